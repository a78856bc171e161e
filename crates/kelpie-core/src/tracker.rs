use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::entities::{EntityId, InteractionHistory, Point};
use crate::time;

/// Per-entity event buffer cap. Oldest entries are evicted first; bounds memory without losing
/// recent-history fidelity.
pub const MAX_EVENTS_PER_ENTITY: usize = 100;

/// Trailing window over which `frequency` counts events.
pub const FREQUENCY_WINDOW_MS: i64 = 60_000;

#[derive(Debug, Clone, Copy)]
struct InteractionEvent {
    timestamp: i64,
    /// Interaction duration (ms).
    duration: f64,
    /// Instantaneous velocity (px/s), 0 when no derivation path applied.
    velocity: f64,
}

#[derive(Debug, Clone, Copy)]
struct PositionSample {
    point: Point,
    at: i64,
}

/// Records raw per-entity interaction events and reduces them to [`InteractionHistory`]
/// snapshots on read.
///
/// The tracker exclusively owns its buffers; `history` returns an owned aggregate so callers
/// can never alias or mutate internal state.
#[derive(Debug, Default)]
pub struct InteractionTracker {
    events: FxHashMap<EntityId, VecDeque<InteractionEvent>>,
    last_positions: FxHashMap<EntityId, PositionSample>,
}

impl InteractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one event for `id`, deriving an instantaneous velocity.
    ///
    /// Velocity paths, in order:
    /// 1. both endpoints and a positive duration: `distance(start, end) / (duration / 1000)`;
    /// 2. a previous position sample plus an end position: distance from the sample divided by
    ///    wall-clock time elapsed since it (0 if nothing elapsed);
    /// 3. otherwise 0.
    ///
    /// An `end` position always becomes the new last-known sample, stamped at call time.
    pub fn record(
        &mut self,
        id: &EntityId,
        duration: f64,
        start: Option<Point>,
        end: Option<Point>,
    ) {
        let now = time::now_ms();
        let velocity = match (start, end) {
            (Some(s), Some(e)) if duration > 0.0 => s.distance_to(e) / (duration / 1000.0),
            _ => match (self.last_positions.get(id), end) {
                (Some(sample), Some(e)) => {
                    let elapsed = (now - sample.at) as f64;
                    if elapsed > 0.0 {
                        sample.point.distance_to(e) / (elapsed / 1000.0)
                    } else {
                        0.0
                    }
                }
                _ => 0.0,
            },
        };

        if let Some(e) = end {
            self.last_positions
                .insert(id.clone(), PositionSample { point: e, at: now });
        }

        let buf = self.events.entry(id.clone()).or_default();
        buf.push_back(InteractionEvent {
            timestamp: now,
            duration,
            velocity,
        });
        while buf.len() > MAX_EVENTS_PER_ENTITY {
            buf.pop_front();
        }
    }

    /// Reduces `id`'s buffer to an aggregate snapshot. All-zero when no events exist.
    pub fn history(&self, id: &EntityId) -> InteractionHistory {
        let Some(buf) = self.events.get(id) else {
            return InteractionHistory::default();
        };
        let Some(newest) = buf.back() else {
            return InteractionHistory::default();
        };

        let now = time::now_ms();
        let frequency = buf
            .iter()
            .filter(|e| now - e.timestamp <= FREQUENCY_WINDOW_MS)
            .count();
        let total_duration = buf.iter().map(|e| e.duration).sum();
        let average_velocity = buf.iter().map(|e| e.velocity).sum::<f64>() / buf.len() as f64;

        InteractionHistory {
            frequency,
            total_duration,
            last_interaction_time: newest.timestamp,
            average_velocity,
            interaction_count: buf.len(),
        }
    }

    /// Clears all buffers and last-position samples.
    pub fn reset(&mut self) {
        self.events.clear();
        self.last_positions.clear();
    }
}
