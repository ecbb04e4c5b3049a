//! NPC relationship updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sfa_core::relationship::{MAX_AFFINITY, MIN_AFFINITY};
use sfa_core::{Relationship, RelationshipStatus};
use tracing::debug;

use crate::error::{MechError, MechResult};

/// A clamped affinity level and the status derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipUpdate {
    /// New affinity, within `[-100, 100]`.
    pub level: i32,
    /// Status bucket for `level`.
    pub status: RelationshipStatus,
}

/// Add `delta` to an affinity level, clamp, and re-derive the status.
pub fn apply_delta(current: i32, delta: i32) -> RelationshipUpdate {
    let level = current.saturating_add(delta).clamp(MIN_AFFINITY, MAX_AFFINITY);
    RelationshipUpdate {
        level,
        status: RelationshipStatus::from_level(level),
    }
}

/// Record one interaction with an NPC.
///
/// Creates the relationship at level 0 on first contact. Always bumps the
/// interaction count and stamps `now`. A non-empty `npc_name` replaces the
/// stored display name. An `existing` record for a different NPC is
/// rejected.
pub fn record_interaction(
    existing: Option<&Relationship>,
    npc_id: &str,
    npc_name: &str,
    delta: i32,
    now: DateTime<Utc>,
) -> MechResult<Relationship> {
    if let Some(record) = existing {
        if record.npc_id != npc_id {
            return Err(MechError::InvalidArgument(format!(
                "relationship for '{}' passed for NPC '{npc_id}'",
                record.npc_id
            )));
        }
    }
    let mut relationship = existing.cloned().unwrap_or_else(|| Relationship {
        npc_id: npc_id.to_string(),
        npc_name: npc_name.to_string(),
        level: 0,
        status: RelationshipStatus::Neutral,
        interaction_count: 0,
        last_interaction: None,
    });

    if !npc_name.is_empty() {
        relationship.npc_name = npc_name.to_string();
    }
    let update = apply_delta(relationship.level, delta);
    relationship.level = update.level;
    relationship.status = update.status;
    relationship.interaction_count = relationship.interaction_count.saturating_add(1);
    relationship.last_interaction = Some(now);

    debug!(
        npc = %relationship.npc_id,
        level = relationship.level,
        status = %relationship.status,
        "relationship updated"
    );
    Ok(relationship)
}
