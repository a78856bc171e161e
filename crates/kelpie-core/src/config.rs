/// Smallest population the store will create.
pub const MIN_ENTITY_COUNT: usize = 10;
/// Largest population the store will create.
pub const MAX_ENTITY_COUNT: usize = 20;
/// Default population size.
pub const DEFAULT_ENTITY_COUNT: usize = 15;

/// Consumer-facing configuration for a session's entity population.
///
/// The population is fixed for the lifetime of a session: entities are created once from this
/// config and never added or removed afterwards (dismissal is a state flag, not a deletion).
#[derive(Debug, Clone)]
pub struct PopulationConfig {
    /// Requested entity count, clamped to `[MIN_ENTITY_COUNT, MAX_ENTITY_COUNT]` at creation.
    pub entity_count: usize,
    /// Seed for the deterministic initial visuals and placement.
    pub seed: u64,
    /// Container dimensions used for the initial spread. Layout passes take their own viewport,
    /// which may differ as the container resizes over the session.
    pub initial_width: f64,
    pub initial_height: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            entity_count: DEFAULT_ENTITY_COUNT,
            seed: 0,
            initial_width: 1280.0,
            initial_height: 800.0,
        }
    }
}

impl PopulationConfig {
    pub fn clamped_entity_count(&self) -> usize {
        self.entity_count.clamp(MIN_ENTITY_COUNT, MAX_ENTITY_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_count_is_clamped_to_the_population_range() {
        let mut config = PopulationConfig::default();
        assert_eq!(config.clamped_entity_count(), DEFAULT_ENTITY_COUNT);
        config.entity_count = 3;
        assert_eq!(config.clamped_entity_count(), MIN_ENTITY_COUNT);
        config.entity_count = 64;
        assert_eq!(config.clamped_entity_count(), MAX_ENTITY_COUNT);
    }
}
