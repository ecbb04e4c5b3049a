//! The mission state machine.

use sfa_core::{Choice, Mission, MissionResult, NarrativeStep, NextStep};
use tracing::debug;

use super::{MissionState, StepReport};
use crate::challenge::CheckModifiers;
use crate::config::RewardConfig;
use crate::dice::RollSource;
use crate::error::{MechError, MechResult};

/// One playthrough of a mission.
///
/// Owns the running totals; the mission itself is borrowed. Consumed by
/// [`MissionRun::finish`], so a run produces at most one result.
#[derive(Debug, Clone)]
pub struct MissionRun<'m> {
    mission: &'m Mission,
    rewards: RewardConfig,
    state: MissionState,
    xp: u64,
    reputation: i32,
    discipline: i32,
    history: Vec<StepReport>,
}

impl<'m> MissionRun<'m> {
    /// Start at step 0.
    ///
    /// Rejects a mission with no narrative, a step with no choices, or a
    /// choice pointing past the last step.
    pub fn start(mission: &'m Mission, rewards: &RewardConfig) -> MechResult<Self> {
        if mission.narrative.is_empty() {
            return Err(MechError::InvalidArgument(format!(
                "mission '{}' has no narrative",
                mission.id
            )));
        }
        let steps = mission.narrative.len();
        for (index, step) in mission.narrative.iter().enumerate() {
            if step.choices.is_empty() {
                return Err(MechError::InvalidArgument(format!(
                    "mission '{}' step {index} has no choices",
                    mission.id
                )));
            }
            for choice in &step.choices {
                if let Some(NextStep::Step(next)) = choice.next_step {
                    if next >= steps {
                        return Err(MechError::InvalidArgument(format!(
                            "mission '{}' step {index} points to step {next}, but there are only {steps}",
                            mission.id
                        )));
                    }
                }
            }
        }

        debug!(mission = %mission.id, difficulty = %mission.difficulty, "mission started");
        Ok(Self {
            mission,
            rewards: rewards.clone(),
            state: MissionState::InProgress { step: 0 },
            xp: 0,
            reputation: 0,
            discipline: 0,
            history: Vec::new(),
        })
    }

    /// The mission being played.
    pub fn mission(&self) -> &Mission {
        self.mission
    }

    /// Current state.
    pub fn state(&self) -> MissionState {
        self.state
    }

    /// The step awaiting a choice, if the run is still in progress.
    pub fn current_step(&self) -> Option<&NarrativeStep> {
        match self.state {
            MissionState::InProgress { step } => self.mission.narrative.get(step),
            _ => None,
        }
    }

    /// XP accumulated from choices so far.
    pub fn xp(&self) -> u64 {
        self.xp
    }

    /// Reputation accumulated from choices so far.
    pub fn reputation(&self) -> i32 {
        self.reputation
    }

    /// Discipline accumulated from choices so far.
    pub fn discipline(&self) -> i32 {
        self.discipline
    }

    /// Every choice made so far.
    pub fn history(&self) -> &[StepReport] {
        &self.history
    }

    /// Take choice `index` at the current step.
    ///
    /// A choice without a check always succeeds. A failed check ends a
    /// no-win mission immediately with a reputation gain; any other
    /// mission takes the penalties and follows the choice's `nextStep` if
    /// it names a step, or fails.
    pub fn choose<R: RollSource + ?Sized>(
        &mut self,
        index: usize,
        modifiers: &CheckModifiers,
        rolls: &mut R,
    ) -> MechResult<StepReport> {
        let MissionState::InProgress { step } = self.state else {
            return Err(MechError::MissionFinished);
        };
        let mission = self.mission;
        let choices = &mission.narrative[step].choices;
        let choice = choices.get(index).ok_or(MechError::InvalidChoice {
            index,
            step,
            available: choices.len(),
        })?;

        let xp_before = self.xp;
        let reputation_before = self.reputation;
        let discipline_before = self.discipline;

        let check = match choice.requirement() {
            None => {
                self.xp = self.xp.saturating_add(u64::from(choice.xp_bonus));
                self.reputation = self.reputation.saturating_add(self.rewards.narrative_reputation);
                self.state = advance(choice);
                None
            }
            Some((attribute, required)) => {
                let outcome = modifiers.check(attribute, required, rolls)?;
                if outcome.success {
                    self.xp = self.xp.saturating_add(u64::from(choice.xp_bonus));
                    self.reputation = self
                        .reputation
                        .saturating_add(self.rewards.check_success_reputation);
                    self.discipline = self
                        .discipline
                        .saturating_add(self.rewards.check_success_discipline);
                    self.state = advance(choice);
                } else if mission.difficulty.is_no_win() {
                    self.reputation = self.reputation.saturating_add(self.rewards.no_win_reputation);
                    self.state = MissionState::Failed;
                } else {
                    self.xp = self.xp.saturating_sub(self.rewards.check_failure_xp_penalty);
                    self.reputation = self
                        .reputation
                        .saturating_add(self.rewards.check_failure_reputation);
                    self.discipline = self
                        .discipline
                        .saturating_add(self.rewards.check_failure_discipline);
                    self.state = match choice.next_step {
                        Some(NextStep::Step(next)) => MissionState::InProgress { step: next },
                        _ => MissionState::Failed,
                    };
                }
                Some(outcome)
            }
        };

        let report = StepReport {
            step,
            choice: index,
            check,
            xp_change: signed_difference(self.xp, xp_before),
            reputation_change: self.reputation.saturating_sub(reputation_before),
            discipline_change: self.discipline.saturating_sub(discipline_before),
            state: self.state,
        };
        debug!(
            mission = %mission.id,
            step,
            choice = index,
            state = %self.state,
            "choice resolved"
        );
        self.history.push(report.clone());
        Ok(report)
    }

    /// Turn a finished run into a result.
    ///
    /// A completed mission adds its base XP, the completion bonuses, its
    /// skill reward and its flat rewards. A failed mission keeps only what
    /// the choices accumulated.
    pub fn finish(self) -> MechResult<MissionResult> {
        let mission = self.mission;
        let result = match self.state {
            MissionState::InProgress { step } => return Err(MechError::MissionInProgress(step)),
            MissionState::Completed => MissionResult {
                mission_id: mission.id.clone(),
                mission_title: mission.title.clone(),
                xp_gained: self.xp.saturating_add(u64::from(mission.xp_reward)),
                success: true,
                skill_gained: mission.skill_reward.clone(),
                reputation_change: self
                    .reputation
                    .saturating_add(self.rewards.completion_reputation),
                discipline_change: self
                    .discipline
                    .saturating_add(self.rewards.completion_discipline),
                rewards: Some(mission.rewards.clone()),
            },
            MissionState::Failed => MissionResult {
                mission_id: mission.id.clone(),
                mission_title: mission.title.clone(),
                xp_gained: self.xp,
                success: false,
                skill_gained: None,
                reputation_change: self.reputation,
                discipline_change: self.discipline,
                rewards: None,
            },
        };
        debug!(
            mission = %mission.id,
            success = result.success,
            xp = result.xp_gained,
            "mission finished"
        );
        Ok(result)
    }
}

/// Where a successful choice leads.
fn advance(choice: &Choice) -> MissionState {
    match choice.next_step {
        Some(NextStep::Step(next)) => MissionState::InProgress { step: next },
        Some(NextStep::End) | None => MissionState::Completed,
    }
}

fn signed_difference(after: u64, before: u64) -> i64 {
    if after >= before {
        i64::try_from(after - before).unwrap_or(i64::MAX)
    } else {
        i64::try_from(before - after).map_or(i64::MIN, |d| -d)
    }
}
