//! Level progression and point spending.
//!
//! XP is applied in one pass that resolves any number of level-ups. Every
//! caller that grants XP (mission results, the CLI) goes through
//! [`apply_xp`]; no other code touches `level` or `xp`.
//!
//! All operations take the cadet by reference and return an updated copy,
//! so a failed operation leaves the caller's cadet as it was.

use sfa_core::{
    AttributeAllocation, Character, MIN_ATTRIBUTE, MissionResult, Rank, Skill, SkillCatalog,
};
use tracing::debug;

use crate::config::ProgressionConfig;
use crate::curve::{MAX_LEVEL, threshold_for};
use crate::error::{MechError, MechResult};

/// The outcome of applying XP to a cadet.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelUp {
    /// The updated cadet.
    pub character: Character,
    /// Number of levels gained (0 if none).
    pub levels_gained: u32,
    /// Attribute points awarded by the level-ups.
    pub attribute_points_gained: u32,
    /// Skill points awarded by the level-ups.
    pub skill_points_gained: u32,
    /// Rank before the XP was applied.
    pub previous_rank: Rank,
    /// Whether the rank changed.
    pub rank_changed: bool,
}

/// Apply `xp_gained` to a cadet, rolling overflow into level-ups.
///
/// Each level gained awards the configured attribute and skill points and
/// the rank is recomputed from the rank table. Negative XP, a level outside
/// `1..=MAX_LEVEL`, an attribute below the floor, or a gain that would
/// carry the cadet past `MAX_LEVEL` is rejected.
pub fn apply_xp(
    character: &Character,
    xp_gained: i64,
    config: &ProgressionConfig,
) -> MechResult<LevelUp> {
    let gained = u64::try_from(xp_gained)
        .map_err(|_| MechError::InvalidArgument(format!("negative XP gain: {xp_gained}")))?;
    if character.level == 0 || character.level > MAX_LEVEL {
        return Err(MechError::InvalidArgument(format!(
            "level {} outside 1..={MAX_LEVEL}",
            character.level
        )));
    }
    check_attribute_floor(character)?;

    let mut pool = character.xp.checked_add(gained).ok_or_else(|| {
        MechError::InvalidArgument(format!("XP total overflows: {} + {gained}", character.xp))
    })?;
    let mut level = character.level;
    let mut levels_gained = 0u32;
    loop {
        let threshold = threshold_for(level);
        if pool < threshold {
            break;
        }
        if level == MAX_LEVEL {
            return Err(MechError::InvalidArgument(format!(
                "gain of {gained} XP would pass level {MAX_LEVEL}"
            )));
        }
        pool -= threshold;
        level += 1;
        levels_gained += 1;
    }

    let attribute_points = levels_gained.saturating_mul(config.attribute_points_per_level);
    let skill_points = levels_gained.saturating_mul(config.skill_points_per_level);

    let mut updated = character.clone();
    updated.level = level;
    updated.xp = pool;
    updated.unspent_attribute_points = updated
        .unspent_attribute_points
        .saturating_add(attribute_points);
    updated.total_attribute_points_earned = updated
        .total_attribute_points_earned
        .saturating_add(attribute_points);
    updated.unspent_skill_points = updated.unspent_skill_points.saturating_add(skill_points);

    let previous_rank = character.rank;
    updated.rank = Rank::for_level(level);
    let rank_changed = updated.rank != previous_rank;

    if levels_gained > 0 {
        debug!(
            cadet = %character.id,
            from = character.level,
            to = level,
            "level up"
        );
    }
    if rank_changed {
        debug!(cadet = %character.id, rank = %updated.rank, "rank changed");
    }

    Ok(LevelUp {
        character: updated,
        levels_gained,
        attribute_points_gained: attribute_points,
        skill_points_gained: skill_points,
        previous_rank,
        rank_changed,
    })
}

/// The outcome of applying a finished mission to a cadet.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionApplication {
    /// The updated cadet.
    pub character: Character,
    /// Levels gained from the mission XP.
    pub levels_gained: u32,
    /// Whether the rank changed.
    pub rank_changed: bool,
    /// Skill ids newly unlocked by the mission.
    pub skills_unlocked: Vec<String>,
}

/// Apply a mission result: XP, reputation and discipline always; on
/// success also completion, skill unlocks, credits, skill points and the
/// decoration.
///
/// The result is not tracked, so applying the same result twice grants
/// its XP twice.
pub fn apply_mission_result(
    character: &Character,
    result: &MissionResult,
    catalog: &SkillCatalog,
    config: &ProgressionConfig,
) -> MechResult<MissionApplication> {
    let xp = i64::try_from(result.xp_gained).map_err(|_| {
        MechError::InvalidArgument(format!("mission XP out of range: {}", result.xp_gained))
    })?;
    let level_up = apply_xp(character, xp, config)?;
    let mut cadet = level_up.character;

    cadet.reputation = cadet.reputation.saturating_add(result.reputation_change);
    cadet.discipline = cadet.discipline.saturating_add(result.discipline_change);

    let mut skills_unlocked = Vec::new();
    if result.success {
        if !cadet.has_completed(&result.mission_id) {
            cadet.completed_missions.push(result.mission_id.clone());
        }

        if let Some(name) = &result.skill_gained {
            match catalog.find_by_name(name) {
                Some(skill) => {
                    if unlock(&mut cadet, &skill.id) {
                        skills_unlocked.push(skill.id.clone());
                    }
                }
                None => debug!(skill = %name, "skill reward not in catalog"),
            }
        }

        if let Some(rewards) = &result.rewards {
            if let Some(id) = &rewards.skill_id {
                if unlock(&mut cadet, id) {
                    skills_unlocked.push(id.clone());
                }
            }
            cadet.credits = cadet.credits.saturating_add(rewards.credits);
            cadet.unspent_skill_points = cadet
                .unspent_skill_points
                .saturating_add(rewards.skill_points);
            if let Some(decoration) = &rewards.decoration_id {
                if !cadet.decorations.contains(decoration) {
                    cadet.decorations.push(decoration.clone());
                }
            }
        }
    }

    debug!(
        cadet = %cadet.id,
        mission = %result.mission_id,
        success = result.success,
        xp = result.xp_gained,
        "mission applied"
    );

    Ok(MissionApplication {
        character: cadet,
        levels_gained: level_up.levels_gained,
        rank_changed: level_up.rank_changed,
        skills_unlocked,
    })
}

/// Grant a skill at level 1. Returns false if it was already owned.
fn unlock(cadet: &mut Character, skill_id: &str) -> bool {
    if cadet.owns_skill(skill_id) {
        return false;
    }
    cadet.skill_ids.push(skill_id.to_string());
    cadet.skill_levels.insert(skill_id.to_string(), 1);
    true
}

/// Spend unspent attribute points.
///
/// Points not named in the allocation stay in the pool. No attribute may
/// be raised above the configured cap.
pub fn allocate_attributes(
    character: &Character,
    allocation: &AttributeAllocation,
    config: &ProgressionConfig,
) -> MechResult<Character> {
    check_attribute_floor(character)?;
    let total = allocation.total();
    if total > character.unspent_attribute_points {
        return Err(MechError::InsufficientPoints {
            kind: "attribute",
            needed: total,
            available: character.unspent_attribute_points,
        });
    }

    let mut updated = character.clone();
    for (attribute, points) in allocation.iter() {
        let value = updated.attributes.get(attribute).saturating_add(points);
        if value > config.attribute_cap {
            return Err(MechError::AttributeAtCap {
                attribute: attribute.to_string(),
                value,
                cap: config.attribute_cap,
            });
        }
        *updated.attributes.get_mut(attribute) = value;
    }
    updated.unspent_attribute_points -= total;
    Ok(updated)
}

/// Learn a new skill for one skill point.
///
/// The cadet must meet the skill's level requirement and own every
/// prerequisite at its required level.
pub fn learn_skill(character: &Character, skill: &Skill) -> MechResult<Character> {
    if character.owns_skill(&skill.id) {
        return Err(MechError::SkillAlreadyOwned(skill.id.clone()));
    }
    if character.level < skill.required_level {
        return Err(MechError::SkillLocked {
            id: skill.id.clone(),
            reason: format!("requires level {}", skill.required_level),
        });
    }
    for prerequisite in &skill.required_skill_ids {
        let needed = skill.required_level_of(prerequisite);
        let owned = character.skill_level(prerequisite).unwrap_or(0);
        if owned < needed {
            return Err(MechError::SkillLocked {
                id: skill.id.clone(),
                reason: format!("requires '{prerequisite}' at level {needed}"),
            });
        }
    }
    spend_skill_point(character)?;

    let mut updated = character.clone();
    updated.unspent_skill_points -= 1;
    unlock(&mut updated, &skill.id);
    debug!(cadet = %character.id, skill = %skill.id, "skill learned");
    Ok(updated)
}

/// Raise an owned skill by one level for one skill point.
pub fn upgrade_skill(character: &Character, skill: &Skill) -> MechResult<Character> {
    let Some(level) = character.skill_level(&skill.id) else {
        return Err(MechError::SkillNotOwned(skill.id.clone()));
    };
    if level >= skill.max_level {
        return Err(MechError::SkillAtMaxLevel {
            id: skill.id.clone(),
            max: skill.max_level,
        });
    }
    spend_skill_point(character)?;

    let mut updated = character.clone();
    updated.unspent_skill_points -= 1;
    updated.skill_levels.insert(skill.id.clone(), level + 1);
    debug!(cadet = %character.id, skill = %skill.id, level = level + 1, "skill upgraded");
    Ok(updated)
}

fn check_attribute_floor(character: &Character) -> MechResult<()> {
    match character.attributes.below_floor() {
        Some((attribute, score)) => Err(MechError::InvalidArgument(format!(
            "{attribute} is {score}, below the floor of {MIN_ATTRIBUTE}"
        ))),
        None => Ok(()),
    }
}

fn spend_skill_point(character: &Character) -> MechResult<()> {
    if character.unspent_skill_points == 0 {
        return Err(MechError::InsufficientPoints {
            kind: "skill",
            needed: 1,
            available: 0,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfa_core::{Attribute, Attributes, Division, MissionRewards, Species};

    fn cadet() -> Character {
        Character::new("Uhura", Species::Human, Division::Command, Attributes::default())
    }

    fn config() -> ProgressionConfig {
        ProgressionConfig::default()
    }

    #[test]
    fn multi_level_gain() {
        let result = apply_xp(&cadet(), 250, &config()).unwrap();
        assert_eq!(result.character.level, 3);
        assert_eq!(result.character.xp, 30);
        assert_eq!(result.levels_gained, 2);
        assert_eq!(result.attribute_points_gained, 4);
        assert_eq!(result.skill_points_gained, 4);
        assert_eq!(result.character.unspent_attribute_points, 4);
        assert_eq!(result.character.unspent_skill_points, 4);
        assert_eq!(result.character.total_attribute_points_earned, 4);
        assert_eq!(result.character.rank, Rank::CadetSecondClass);
        assert!(result.rank_changed);
    }

    #[test]
    fn zero_gain_is_identity() {
        let start = cadet();
        let result = apply_xp(&start, 0, &config()).unwrap();
        assert_eq!(result.character, start);
        assert_eq!(result.levels_gained, 0);
        assert!(!result.rank_changed);
    }

    #[test]
    fn exact_threshold_levels_up() {
        let result = apply_xp(&cadet(), 100, &config()).unwrap();
        assert_eq!(result.character.level, 2);
        assert_eq!(result.character.xp, 0);
    }

    #[test]
    fn rejects_negative_xp() {
        let start = cadet();
        assert!(matches!(
            apply_xp(&start, -5, &config()),
            Err(MechError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_bad_level() {
        let mut start = cadet();
        start.level = 0;
        assert!(apply_xp(&start, 10, &config()).is_err());
        start.level = MAX_LEVEL + 1;
        assert!(apply_xp(&start, 10, &config()).is_err());
    }

    #[test]
    fn rejects_attribute_below_floor() {
        let mut start = cadet();
        start.attributes.logic = 0;
        start.unspent_attribute_points = 2;
        assert!(matches!(
            apply_xp(&start, 10, &config()),
            Err(MechError::InvalidArgument(msg)) if msg.contains("logic")
        ));
        let alloc = AttributeAllocation::new().with(Attribute::Agility, 1);
        assert!(matches!(
            allocate_attributes(&start, &alloc, &config()),
            Err(MechError::InvalidArgument(_))
        ));
    }

    #[test]
    fn loaded_cadet_is_floored_and_ranked() {
        let json = r#"{"name": "Uhura", "species": "human", "division": "command",
            "level": 3, "rank": "captain", "attributes": {"logic": 0}}"#;
        let start: Character = serde_json::from_str(json).unwrap();
        let result = apply_xp(&start, 0, &config()).unwrap();
        assert_eq!(result.character, start);
        assert_eq!(result.character.attributes.logic, 1);
        assert_eq!(result.character.rank, Rank::CadetSecondClass);
        assert!(!result.rank_changed);
    }

    #[test]
    fn rejects_passing_max_level() {
        let mut start = cadet();
        start.level = MAX_LEVEL;
        assert!(apply_xp(&start, 0, &config()).is_ok());
        let over = i64::try_from(threshold_for(MAX_LEVEL)).unwrap();
        assert!(matches!(
            apply_xp(&start, over, &config()),
            Err(MechError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rank_clamps_at_captain() {
        let mut start = cadet();
        start.level = 10;
        start.rank = Rank::Captain;
        let result = apply_xp(&start, 515, &config()).unwrap();
        assert_eq!(result.character.level, 11);
        assert_eq!(result.character.rank, Rank::Captain);
        assert!(!result.rank_changed);
    }

    #[test]
    fn custom_points_per_level() {
        let config = ProgressionConfig::default().with_points_per_level(3, 1);
        let result = apply_xp(&cadet(), 100, &config).unwrap();
        assert_eq!(result.character.unspent_attribute_points, 3);
        assert_eq!(result.character.unspent_skill_points, 1);
    }

    fn success(mission: &str, xp: u64) -> MissionResult {
        MissionResult {
            mission_id: mission.to_string(),
            mission_title: String::new(),
            xp_gained: xp,
            success: true,
            skill_gained: Some("Warp Theory".to_string()),
            reputation_change: 12,
            discipline_change: 7,
            rewards: Some(MissionRewards {
                credits: 50,
                skill_points: 1,
                skill_id: Some("first-aid".to_string()),
                decoration_id: Some("medal".to_string()),
            }),
        }
    }

    fn catalog() -> SkillCatalog {
        SkillCatalog::from_skills([
            Skill::new("warp", "Warp Theory"),
            Skill::new("first-aid", "First Aid"),
        ])
        .unwrap()
    }

    #[test]
    fn mission_success_grants_everything() {
        let applied =
            apply_mission_result(&cadet(), &success("m1", 120), &catalog(), &config()).unwrap();
        let c = &applied.character;
        assert_eq!(c.level, 2);
        assert_eq!(c.xp, 20);
        assert_eq!(c.reputation, 12);
        assert_eq!(c.discipline, 7);
        assert_eq!(c.completed_missions, vec!["m1"]);
        assert_eq!(c.skill_ids, vec!["warp", "first-aid"]);
        assert_eq!(c.skill_level("warp"), Some(1));
        assert_eq!(c.credits, 50);
        assert_eq!(c.unspent_skill_points, 3);
        assert_eq!(c.decorations, vec!["medal"]);
        assert_eq!(applied.skills_unlocked.len(), 2);
        assert_eq!(applied.levels_gained, 1);
    }

    #[test]
    fn mission_replay_does_not_duplicate_records() {
        let first =
            apply_mission_result(&cadet(), &success("m1", 10), &catalog(), &config()).unwrap();
        let second =
            apply_mission_result(&first.character, &success("m1", 10), &catalog(), &config())
                .unwrap();
        let c = &second.character;
        assert_eq!(c.completed_missions.len(), 1);
        assert_eq!(c.skill_ids.len(), 2);
        assert_eq!(c.decorations.len(), 1);
        assert!(second.skills_unlocked.is_empty());
        // Not idempotent: XP and credits are granted again.
        assert_eq!(c.xp, 20);
        assert_eq!(c.credits, 100);
    }

    #[test]
    fn mission_failure_keeps_only_deltas() {
        let result = MissionResult {
            success: false,
            skill_gained: None,
            rewards: None,
            reputation_change: -3,
            discipline_change: -5,
            ..success("m2", 0)
        };
        let applied = apply_mission_result(&cadet(), &result, &catalog(), &config()).unwrap();
        let c = &applied.character;
        assert!(c.completed_missions.is_empty());
        assert_eq!(c.reputation, -3);
        assert_eq!(c.discipline, -5);
        assert!(c.skill_ids.is_empty());
    }

    #[test]
    fn allocate_spends_points() {
        let mut start = cadet();
        start.unspent_attribute_points = 4;
        let alloc = AttributeAllocation::new()
            .with(Attribute::Logic, 2)
            .with(Attribute::Agility, 1);
        let updated = allocate_attributes(&start, &alloc, &config()).unwrap();
        assert_eq!(updated.attributes.logic, 7);
        assert_eq!(updated.attributes.agility, 6);
        assert_eq!(updated.unspent_attribute_points, 1);
    }

    #[test]
    fn allocate_rejects_overspend_and_cap() {
        let mut start = cadet();
        start.unspent_attribute_points = 2;
        let too_many = AttributeAllocation::new().with(Attribute::Logic, 3);
        assert!(matches!(
            allocate_attributes(&start, &too_many, &config()),
            Err(MechError::InsufficientPoints { needed: 3, available: 2, .. })
        ));

        start.attributes.logic = 19;
        let over_cap = AttributeAllocation::new().with(Attribute::Logic, 2);
        assert!(matches!(
            allocate_attributes(&start, &over_cap, &config()),
            Err(MechError::AttributeAtCap { value: 21, cap: 20, .. })
        ));
        assert_eq!(start.unspent_attribute_points, 2);
    }

    #[test]
    fn learn_checks_requirements() {
        let mut start = cadet();
        start.unspent_skill_points = 2;

        let mut advanced = Skill::new("warp-2", "Advanced Warp");
        advanced.required_level = 2;
        assert!(matches!(
            learn_skill(&start, &advanced),
            Err(MechError::SkillLocked { .. })
        ));

        start.level = 2;
        advanced.required_skill_ids.push("warp".to_string());
        advanced.required_skill_levels.insert("warp".to_string(), 2);
        assert!(matches!(
            learn_skill(&start, &advanced),
            Err(MechError::SkillLocked { .. })
        ));

        let basic = Skill::new("warp", "Warp Theory");
        let start = learn_skill(&start, &basic).unwrap();
        assert!(learn_skill(&start, &advanced).is_err());
        let start = upgrade_skill(&start, &basic).unwrap();
        assert_eq!(start.unspent_skill_points, 0);
        assert_eq!(start.skill_level("warp"), Some(2));

        let mut start = start;
        start.unspent_skill_points = 1;
        let learned = learn_skill(&start, &advanced).unwrap();
        assert_eq!(learned.skill_level("warp-2"), Some(1));
        assert!(matches!(
            learn_skill(&learned, &advanced),
            Err(MechError::SkillAlreadyOwned(_))
        ));
    }

    #[test]
    fn learn_needs_a_point() {
        let start = cadet();
        assert!(matches!(
            learn_skill(&start, &Skill::new("x", "X")),
            Err(MechError::InsufficientPoints { kind: "skill", .. })
        ));
    }

    #[test]
    fn upgrade_respects_max_level() {
        let mut start = cadet();
        start.unspent_skill_points = 10;
        let mut skill = Skill::new("tactics", "Tactics");
        skill.max_level = 2;
        assert!(matches!(
            upgrade_skill(&start, &skill),
            Err(MechError::SkillNotOwned(_))
        ));
        let start = learn_skill(&start, &skill).unwrap();
        let start = upgrade_skill(&start, &skill).unwrap();
        assert!(matches!(
            upgrade_skill(&start, &skill),
            Err(MechError::SkillAtMaxLevel { max: 2, .. })
        ));
    }
}
