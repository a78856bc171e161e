use kelpie_core::{
    Entity, EntityId, EntityStore, EntityUpdate, InteractionKind, InteractionState, Point,
    PopulationConfig, SpringConfig, derive_layout_spring, derive_spring,
};
use selkie::{LayoutOptions, LayoutResult, Result, Viewport};

/// One animated population plus its layout configuration.
///
/// The session owns no timer: the host schedules [`Session::tick`] (the upstream cadence is
/// every 3 s) and forwards pointer events to the interaction methods as they arrive. Both run
/// on the same event loop, so effects apply in call order with no interleaving.
#[derive(Debug)]
pub struct Session {
    store: EntityStore,
    options: LayoutOptions,
    reduced_motion: bool,
}

impl Session {
    pub fn new(config: &PopulationConfig) -> Self {
        Self::with_options(config, LayoutOptions::default(), false)
    }

    pub fn with_options(
        config: &PopulationConfig,
        options: LayoutOptions,
        reduced_motion: bool,
    ) -> Self {
        Self {
            store: EntityStore::new(config),
            options,
            reduced_motion,
        }
    }

    pub fn entities(&self) -> &[Entity] {
        self.store.entities()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
    }

    /// Forwards one pointer interaction to the store (history + visual adaptation).
    pub fn apply_interaction(
        &mut self,
        id: &EntityId,
        kind: InteractionKind,
        duration: f64,
        start: Option<Point>,
        end: Option<Point>,
    ) {
        self.store.apply_interaction(id, kind, duration, start, end);
    }

    pub fn set_interaction_state(&mut self, id: &EntityId, state: InteractionState) {
        self.store.set_interaction_state(id, state);
    }

    /// Manual repositioning during a drag; exempts the entity from upcoming layout passes.
    pub fn set_target_position(&mut self, id: &EntityId, x: f64, y: f64) {
        self.store.set_target_position(id, x, y);
    }

    /// One periodic step: refresh every history snapshot, fade untouched entities, recompute
    /// targets, and commit them. Returns the pass result so hosts can read the signals.
    pub fn tick(&mut self, viewport: Viewport) -> Result<LayoutResult> {
        self.store.refresh_histories();
        self.store.apply_idle_decay();
        let result = selkie::recalculate(self.store.entities(), &self.options, viewport)?;
        for (id, target) in &result.targets {
            self.store.update_entity(
                id,
                EntityUpdate {
                    target_position: Some(*target),
                    ..Default::default()
                },
            );
        }
        tracing::trace!(committed = result.targets.len(), "tick committed");
        Ok(result)
    }

    /// Spring parameters for one entity's animator, from its latest merged history.
    pub fn spring_for(&self, id: &EntityId) -> Option<SpringConfig> {
        self.store
            .entity(id)
            .map(|e| derive_spring(&e.interaction_history, self.reduced_motion))
    }

    /// Population-wide spring for whole-layout transitions.
    pub fn layout_spring(&self) -> SpringConfig {
        derive_layout_spring(self.store.entities(), self.reduced_motion)
    }

    /// Clears all interaction buffers and aggregates; the population itself is untouched.
    pub fn reset(&mut self) {
        self.store.reset_interactions();
    }
}
