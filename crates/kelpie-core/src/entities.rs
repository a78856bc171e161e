use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Stable entity identifier in the `entity-<index>` format.
///
/// Ids are assigned once at population creation and never reassigned. The numeric suffix is
/// load-bearing: the layout engine folds it into the deterministic base-target hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn from_index(index: usize) -> Self {
        Self(format!("entity-{index}"))
    }

    /// Parses an externally supplied id, rejecting anything outside the `entity-<index>` format.
    pub fn parse(raw: &str) -> Result<Self> {
        let suffix = raw.strip_prefix("entity-").ok_or_else(|| Error::MalformedEntityId {
            id: raw.to_string(),
        })?;
        if suffix.is_empty() || suffix.parse::<u64>().is_err() {
            return Err(Error::MalformedEntityId {
                id: raw.to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    /// Numeric suffix of the id. Defensive 0 for ids that skipped [`EntityId::parse`]
    /// (for example deserialized from an untrusted snapshot).
    pub fn index(&self) -> u64 {
        self.0
            .strip_prefix("entity-")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Square,
    Hexagon,
}

/// UI-reported lifecycle state. The core never infers it; callers set it explicitly and the
/// layout engine only reads it (an `Active` entity repels its neighbors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionState {
    Idle,
    Active,
    Hovered,
    Ignored,
    Dismissed,
}

/// Discrete interaction type reported by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Hover,
    Click,
    Drag,
}

/// Per-entity visual state consumed by the external renderer.
///
/// `color` and `shape` are fixed for the entity's lifetime; `size` and `opacity` adapt to the
/// interaction history within [36, 140] and [0.18, 1] respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualState {
    pub size: f64,
    pub color: String,
    pub opacity: f64,
    pub shape: Shape,
}

/// Time-windowed statistical aggregate over an entity's event buffer.
///
/// Recomputed on read by the tracker; the copy stored on the entity is the most recent
/// snapshot merged by the store. All-zero when no events were ever recorded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionHistory {
    /// Events within the trailing 60 s window at query time.
    pub frequency: usize,
    /// Sum of every retained event's duration (ms).
    pub total_duration: f64,
    /// Timestamp (ms since epoch) of the newest retained event, 0 if none.
    pub last_interaction_time: i64,
    /// Arithmetic mean of every retained event's velocity (px/s).
    pub average_velocity: f64,
    /// Retained event buffer length (≤ 100).
    pub interaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    pub visual_state: VisualState,
    pub interaction_state: InteractionState,
    pub interaction_history: InteractionHistory,
    /// Informational current position, tracked by the external animator.
    pub position: Point,
    /// Authoritative layout target the animator springs toward.
    pub target_position: Point,
    /// Immutable creation timestamp (ms since epoch); seed component of the layout hash.
    pub created_at: i64,
    /// Set only by explicit manual repositioning; exempts the entity from automatic layout
    /// until the exemption window elapses.
    pub last_drag_time: Option<i64>,
}

/// Partial update merged into an entity by [`crate::store::EntityStore::update_entity`].
///
/// The merge is shallow: each present field replaces the entity's field wholesale, including
/// the nested sub-objects (callers construct the merged sub-object first).
#[derive(Debug, Clone, Default)]
pub struct EntityUpdate {
    pub visual_state: Option<VisualState>,
    pub interaction_state: Option<InteractionState>,
    pub interaction_history: Option<InteractionHistory>,
    pub position: Option<Point>,
    pub target_position: Option<Point>,
    pub last_drag_time: Option<i64>,
}
