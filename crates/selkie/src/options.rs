use crate::error::{Error, Result};

/// Container dimensions for one layout pass. Consumer-supplied and allowed to change between
/// passes as the container resizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || !self.height.is_finite() || self.width <= 0.0 || self.height <= 0.0
        {
            return Err(Error::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Tuning constants for the layout pass. The defaults are the product-tuned values; they are
/// exposed as options so hosts can adjust density without patching the engine.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Inset for the pseudo-random base placement band.
    pub padding: f64,
    /// Hard inset every final target is clamped into.
    pub margin: f64,
    /// Targets closer than this to an active peer get pushed apart.
    pub repulsion_radius: f64,
    /// Push magnitude at zero distance; falls off linearly to the radius.
    pub repulsion_strength: f64,
    /// How long a manually dragged entity is exempt from recomputation.
    pub drag_exemption_ms: i64,
    /// Idle time past which an empty-window entity counts as ignored.
    pub ignore_after_ms: i64,
    /// Scale applied to `frequency_score - 0.5` for the engagement center pull.
    pub center_pull_scale: f64,
    /// Half-range of the signed per-entity offset folded into the base target.
    pub jitter_amplitude: f64,
    /// Orbital drift: per-entity angular speed is `base + index * step` (radians per ms).
    pub drift_base_speed: f64,
    pub drift_speed_step: f64,
    /// Orbital drift: per-entity amplitude is `base + (index % 5) * step` pixels.
    pub drift_base_amplitude: f64,
    pub drift_amplitude_step: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            padding: 80.0,
            margin: 40.0,
            repulsion_radius: 180.0,
            repulsion_strength: 28.0,
            drag_exemption_ms: 10_000,
            ignore_after_ms: 8_000,
            center_pull_scale: 0.3,
            jitter_amplitude: 75.0,
            drift_base_speed: 0.00008,
            drift_speed_step: 0.00003,
            drift_base_amplitude: 15.0,
            drift_amplitude_step: 8.0,
        }
    }
}
