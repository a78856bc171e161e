use kelpie_core::time::with_fixed_now_ms;
use kelpie_core::{EntityId, EntityStore, InteractionKind, InteractionState, PopulationConfig};
use selkie::{LayoutOptions, Viewport, recalculate};

fn fresh_store() -> EntityStore {
    EntityStore::new(&PopulationConfig {
        seed: 7,
        ..Default::default()
    })
}

#[test]
fn rejects_degenerate_viewports() {
    let store = fresh_store();
    let opts = LayoutOptions::default();
    assert!(recalculate(store.entities(), &opts, Viewport::new(0.0, 600.0)).is_err());
    assert!(recalculate(store.entities(), &opts, Viewport::new(f64::NAN, 600.0)).is_err());
}

#[test]
fn every_target_lands_inside_the_margin() {
    with_fixed_now_ms(Some(1_000_000), || {
        let mut store = fresh_store();
        // Mix of engaged, active, and untouched entities.
        store.apply_interaction(&EntityId::from_index(0), InteractionKind::Hover, 2_000.0, None, None);
        store.set_interaction_state(&EntityId::from_index(1), InteractionState::Active);
        store.refresh_histories();

        let opts = LayoutOptions::default();
        let viewport = Viewport::new(900.0, 600.0);
        let result = recalculate(store.entities(), &opts, viewport).expect("valid viewport");

        assert_eq!(result.targets.len(), store.len());
        for (id, target) in &result.targets {
            assert!(
                target.x >= opts.margin && target.x <= viewport.width - opts.margin,
                "{id}: x={} outside margin",
                target.x
            );
            assert!(
                target.y >= opts.margin && target.y <= viewport.height - opts.margin,
                "{id}: y={} outside margin",
                target.y
            );
        }
    });
}

#[test]
fn passes_are_deterministic_at_a_fixed_instant() {
    with_fixed_now_ms(Some(1_000_000), || {
        let store = fresh_store();
        let opts = LayoutOptions::default();
        let viewport = Viewport::new(1280.0, 800.0);
        let a = recalculate(store.entities(), &opts, viewport).unwrap();
        let b = recalculate(store.entities(), &opts, viewport).unwrap();
        assert_eq!(a.targets, b.targets);
    });
}

#[test]
fn recently_dragged_entities_are_exempt_until_the_window_elapses() {
    let mut store = fresh_store();
    let dragged = EntityId::from_index(3);
    with_fixed_now_ms(Some(1_000_000), || {
        store.set_target_position(&dragged, 333.0, 444.0);
    });

    let opts = LayoutOptions::default();
    let viewport = Viewport::new(1280.0, 800.0);

    with_fixed_now_ms(Some(1_005_000), || {
        let result = recalculate(store.entities(), &opts, viewport).unwrap();
        assert!(!result.targets.contains_key(&dragged));
        // Signals still cover the exempt entity.
        assert!(result.signals.contains_key(&dragged));
        assert_eq!(result.targets.len(), store.len() - 1);
    });

    with_fixed_now_ms(Some(1_010_000), || {
        let result = recalculate(store.entities(), &opts, viewport).unwrap();
        assert!(result.targets.contains_key(&dragged));
    });
}

#[test]
fn ignored_entities_drift_to_a_quadrant_edge() {
    // Entities with no interactions ever have an empty window and a last-touch in the distant
    // past, so every one of them takes the edge override before drift and clamping.
    with_fixed_now_ms(Some(1_000_000), || {
        let store = fresh_store();
        let opts = LayoutOptions::default();
        let viewport = Viewport::new(1000.0, 1000.0);
        let result = recalculate(store.entities(), &opts, viewport).unwrap();

        // Drift can move an edge target by at most the largest per-entity amplitude.
        let max_drift = opts.drift_base_amplitude + 4.0 * opts.drift_amplitude_step;
        for (id, target) in &result.targets {
            let near_edge = |v: f64, dim: f64| {
                (v - dim * 0.1).abs() <= max_drift || (v - dim * 0.9).abs() <= max_drift
            };
            assert!(near_edge(target.x, viewport.width), "{id}: x={}", target.x);
            assert!(near_edge(target.y, viewport.height), "{id}: y={}", target.y);
        }
    });
}

#[test]
fn base_placement_ignores_interaction_history() {
    with_fixed_now_ms(Some(1_000_000), || {
        let mut store = fresh_store();
        let opts = LayoutOptions::default();
        let viewport = Viewport::new(1280.0, 800.0);
        let before = recalculate(store.entities(), &opts, viewport).unwrap();

        // A single click neither engages the center pull (frequency_score 1/6) nor activates
        // repulsion against the others' stale targets, but it does clear the ignored override,
        // so only the touched entity may move.
        let touched = EntityId::from_index(2);
        store.apply_interaction(&touched, InteractionKind::Click, 100.0, None, None);
        store.refresh_histories();
        let after = recalculate(store.entities(), &opts, viewport).unwrap();

        for (id, target) in &before.targets {
            if id == &touched {
                continue;
            }
            // Peers see one active entity now; ignore any peer near enough that its pre-drift
            // tentative target could have been within repulsion range.
            let dist = target.distance_to(store.entity(&touched).unwrap().target_position);
            let slack = opts.drift_base_amplitude
                + 4.0 * opts.drift_amplitude_step
                + opts.repulsion_strength;
            if dist < opts.repulsion_radius + slack {
                continue;
            }
            assert_eq!(after.targets.get(id), Some(target), "{id} moved without cause");
        }
    });
}
