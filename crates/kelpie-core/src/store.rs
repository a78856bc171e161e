use crate::config::PopulationConfig;
use crate::entities::{
    Entity, EntityId, EntityUpdate, InteractionKind, InteractionState, Point, Shape, VisualState,
};
use crate::palette;
use crate::rng::XorShift64Star;
use crate::time;
use crate::tracker::InteractionTracker;

/// Hard bounds on adaptive visual fields.
pub const SIZE_RANGE: (f64, f64) = (36.0, 140.0);
pub const OPACITY_RANGE: (f64, f64) = (0.18, 1.0);

/// Idle thresholds (ms) past which the decay rules fire for an empty frequency window.
const DECAY_IDLE_MS: i64 = 10_000;
const DEEP_DECAY_IDLE_MS: i64 = 15_000;

/// Initial spread keeps entities away from the container edges, matching the layout padding.
const INITIAL_PADDING: f64 = 80.0;

const SHAPES: [Shape; 3] = [Shape::Circle, Shape::Square, Shape::Hexagon];

/// Owns the canonical entity collection and the interaction tracker feeding it.
///
/// Single-threaded by design: every mutation happens on the caller's event loop, so the store
/// needs no locking. State transitions replace whole sub-objects (visual state, history,
/// target) rather than mutating them in place, so snapshots handed out earlier stay coherent.
#[derive(Debug)]
pub struct EntityStore {
    entities: Vec<Entity>,
    tracker: InteractionTracker,
}

impl EntityStore {
    /// Creates the fixed population: `entity-0 … entity-(n-1)` with deterministic per-entity
    /// visuals and placement derived from the config seed.
    pub fn new(config: &PopulationConfig) -> Self {
        let now = time::now_ms();
        let count = config.clamped_entity_count();
        let mut rng = XorShift64Star::new(config.seed);

        let spread_w = (config.initial_width - 2.0 * INITIAL_PADDING).max(0.0);
        let spread_h = (config.initial_height - 2.0 * INITIAL_PADDING).max(0.0);

        let mut entities = Vec::with_capacity(count);
        for index in 0..count {
            rng.mix_u64(index as u64);
            let position = Point::new(
                INITIAL_PADDING + rng.next_f64_unit() * spread_w,
                INITIAL_PADDING + rng.next_f64_unit() * spread_h,
            );
            entities.push(Entity {
                id: EntityId::from_index(index),
                visual_state: VisualState {
                    size: 48.0 + rng.next_f64_unit() * 48.0,
                    color: palette::color_for_index(index).to_string(),
                    opacity: 0.55 + rng.next_f64_unit() * 0.4,
                    shape: SHAPES[index % SHAPES.len()],
                },
                interaction_state: InteractionState::Idle,
                interaction_history: Default::default(),
                position,
                target_position: position,
                created_at: now,
                last_drag_time: None,
            });
        }

        tracing::debug!(count, seed = config.seed, "entity population created");
        Self {
            entities,
            tracker: InteractionTracker::new(),
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Copy-on-read snapshot for consumers that outlive the next mutation.
    pub fn snapshot(&self) -> Vec<Entity> {
        self.entities.clone()
    }

    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn tracker(&self) -> &InteractionTracker {
        &self.tracker
    }

    /// Merges a partial update into the matching entity. Unknown id is a silent no-op.
    ///
    /// Present fields replace the entity's fields wholesale, nested sub-objects included.
    pub fn update_entity(&mut self, id: &EntityId, update: EntityUpdate) {
        let Some(entity) = self.entities.iter_mut().find(|e| &e.id == id) else {
            return;
        };
        if let Some(visual) = update.visual_state {
            entity.visual_state = visual;
        }
        if let Some(state) = update.interaction_state {
            entity.interaction_state = state;
        }
        if let Some(history) = update.interaction_history {
            entity.interaction_history = history;
        }
        if let Some(position) = update.position {
            entity.position = position;
        }
        if let Some(target) = update.target_position {
            entity.target_position = target;
        }
        if let Some(drag) = update.last_drag_time {
            entity.last_drag_time = Some(drag);
        }
    }

    pub fn set_interaction_state(&mut self, id: &EntityId, state: InteractionState) {
        if let Some(entity) = self.entities.iter_mut().find(|e| &e.id == id) {
            entity.interaction_state = state;
        }
    }

    /// Records one interaction, merges the freshly computed history into the entity, and
    /// applies the visual adaptation rules to the pre-update visual state.
    ///
    /// Unknown id is a silent no-op: nothing is recorded, so bogus ids cannot grow tracker
    /// state. The rules are independent deltas, not branches: more than one may fire per call.
    pub fn apply_interaction(
        &mut self,
        id: &EntityId,
        kind: InteractionKind,
        duration: f64,
        start: Option<Point>,
        end: Option<Point>,
    ) {
        let Some(slot) = self.entities.iter().position(|e| &e.id == id) else {
            return;
        };
        self.tracker.record(id, duration, start, end);
        let history = self.tracker.history(id);
        let entity = &mut self.entities[slot];

        let now = time::now_ms();
        let mut visual = entity.visual_state.clone();

        if history.frequency > 3 {
            visual.size = (visual.size + 12.0).min(130.0);
            visual.opacity = (visual.opacity + 0.12).min(OPACITY_RANGE.1);
        }
        if history.average_velocity > 600.0 {
            visual.size = (visual.size + 6.0).min(135.0);
            visual.opacity = (visual.opacity + 0.05).min(OPACITY_RANGE.1);
        }
        if kind == InteractionKind::Hover && duration > 1200.0 {
            visual.opacity = (visual.opacity + 0.08).min(OPACITY_RANGE.1);
        }
        if kind == InteractionKind::Click && duration < 400.0 {
            visual.size = (visual.size + 4.0).min(SIZE_RANGE.1);
        }
        decay_visual(&mut visual, &history, now);

        tracing::trace!(
            entity = %id,
            ?kind,
            duration,
            frequency = history.frequency,
            "interaction applied"
        );
        entity.interaction_history = history;
        entity.visual_state = visual;
    }

    /// Sets the target position and stamps `last_drag_time`, exempting the entity from layout
    /// passes until the exemption window elapses.
    pub fn set_target_position(&mut self, id: &EntityId, x: f64, y: f64) {
        let now = time::now_ms();
        if let Some(entity) = self.entities.iter_mut().find(|e| &e.id == id) {
            entity.target_position = Point::new(x, y);
            entity.last_drag_time = Some(now);
        }
    }

    /// Merges the latest tracker aggregates into every entity.
    pub fn refresh_histories(&mut self) {
        for entity in &mut self.entities {
            entity.interaction_history = self.tracker.history(&entity.id);
        }
    }

    /// Applies the idle decay rules to every entity whose frequency window is empty.
    ///
    /// `apply_interaction` always records an event first, so its freshly computed history can
    /// never qualify; this is the path by which untouched entities fade. Run it from the same
    /// periodic tick that drives the layout pass, after `refresh_histories`.
    pub fn apply_idle_decay(&mut self) {
        let now = time::now_ms();
        for entity in &mut self.entities {
            let mut visual = entity.visual_state.clone();
            decay_visual(&mut visual, &entity.interaction_history, now);
            entity.visual_state = visual;
        }
    }

    /// Clears the population's interaction buffers and aggregates; visuals and positions keep
    /// their current values.
    pub fn reset_interactions(&mut self) {
        self.tracker.reset();
        for entity in &mut self.entities {
            entity.interaction_history = Default::default();
        }
    }
}

/// The two idle decay deltas. Both may fire on the same call; the deep rule further reduces
/// opacity after the first, compounding intentionally.
fn decay_visual(
    visual: &mut VisualState,
    history: &crate::entities::InteractionHistory,
    now: i64,
) {
    if history.frequency != 0 {
        return;
    }
    let idle = now - history.last_interaction_time;
    if idle > DECAY_IDLE_MS {
        visual.size = (visual.size - 8.0).max(SIZE_RANGE.0);
        visual.opacity = (visual.opacity - 0.08).max(0.25);
    }
    if idle > DEEP_DECAY_IDLE_MS {
        visual.opacity = (visual.opacity - 0.12).max(OPACITY_RANGE.0);
    }
}
