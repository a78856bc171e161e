//! Deterministic base-target generation.
//!
//! Each entity's base placement is a pure function of its creation timestamp, its index in the
//! current pass, and its numeric id suffix. Interaction history never feeds in, so the base
//! stays stable across recalculations; only the engagement adjustments and the time-varying
//! drift move targets between passes.

use kelpie_core::rng::XorShift64Star;

use crate::options::{LayoutOptions, Viewport};

/// Raw hash output: two unit fractions for the placement band plus two signed jitter offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseSample {
    pub fx: f64,
    pub fy: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

pub fn base_sample(
    created_at: i64,
    index: usize,
    id_suffix: u64,
    jitter_amplitude: f64,
) -> BaseSample {
    let mut rng = XorShift64Star::new(created_at as u64);
    rng.mix_u64(index as u64);
    rng.mix_u64(id_suffix);
    BaseSample {
        fx: rng.next_f64_unit(),
        fy: rng.next_f64_unit(),
        offset_x: rng.next_f64_signed() * jitter_amplitude,
        offset_y: rng.next_f64_signed() * jitter_amplitude,
    }
}

/// Base target inside the `[padding, dimension - padding]` band, plus jitter. The final clamp
/// to the margin happens at the end of the pass.
pub fn base_target(
    created_at: i64,
    index: usize,
    id_suffix: u64,
    viewport: Viewport,
    opts: &LayoutOptions,
) -> (f64, f64) {
    let sample = base_sample(created_at, index, id_suffix, opts.jitter_amplitude);
    let band_w = (viewport.width - 2.0 * opts.padding).max(0.0);
    let band_h = (viewport.height - 2.0 * opts.padding).max(0.0);
    (
        opts.padding + sample.fx * band_w + sample.offset_x,
        opts.padding + sample.fy * band_h + sample.offset_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_yield_identical_samples() {
        let a = base_sample(1_700_000_000_000, 4, 4, 75.0);
        let b = base_sample(1_700_000_000_000, 4, 4, 75.0);
        assert_eq!(a, b);
    }

    #[test]
    fn each_seed_component_perturbs_the_sample() {
        let base = base_sample(1_700_000_000_000, 4, 4, 75.0);
        assert_ne!(base, base_sample(1_700_000_000_001, 4, 4, 75.0));
        assert_ne!(base, base_sample(1_700_000_000_000, 5, 4, 75.0));
        assert_ne!(base, base_sample(1_700_000_000_000, 4, 5, 75.0));
    }

    #[test]
    fn fractions_and_offsets_stay_in_range() {
        for index in 0..20 {
            let s = base_sample(1_700_000_000_000, index, index as u64, 75.0);
            assert!((0.0..1.0).contains(&s.fx));
            assert!((0.0..1.0).contains(&s.fy));
            assert!(s.offset_x.abs() <= 75.0);
            assert!(s.offset_y.abs() <= 75.0);
        }
    }

    #[test]
    fn base_target_lands_in_the_padded_band_plus_jitter() {
        let viewport = Viewport::new(1000.0, 700.0);
        let opts = LayoutOptions::default();
        for index in 0..20 {
            let (x, y) = base_target(1_700_000_000_000, index, index as u64, viewport, &opts);
            assert!(x >= opts.padding - opts.jitter_amplitude);
            assert!(x <= viewport.width - opts.padding + opts.jitter_amplitude);
            assert!(y >= opts.padding - opts.jitter_amplitude);
            assert!(y <= viewport.height - opts.padding + opts.jitter_amplitude);
        }
    }
}
