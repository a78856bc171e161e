#![forbid(unsafe_code)]

//! Adaptive force-directed target placement for interactive entity populations.
//!
//! `selkie` is a headless, timer-agnostic layout engine: the host application calls
//! [`recalculate`] on its own schedule (typically every few seconds) with the latest entity
//! snapshots, and commits the returned targets back into its store. Nothing here draws,
//! interpolates, or owns a timer; smoothing is the external spring animator's job.
//!
//! One pass, per entity: deterministic pseudo-random base placement, engagement-weighted
//! center pull, ignored-entity edge drift, pairwise repulsion from active peers, oscillating
//! orbital drift, and a final clamp into the viewport margin. Entities dragged manually within
//! the exemption window keep their current target.

pub mod engine;
pub mod error;
pub mod hash;
pub mod options;

pub use engine::{EngagementSignals, LayoutResult, engagement_signals};
pub use error::{Error, Result};
pub use options::{LayoutOptions, Viewport};

use kelpie_core::Entity;

/// Headless layout entry point: recomputes target positions for every non-exempt entity.
pub fn recalculate(
    entities: &[Entity],
    opts: &LayoutOptions,
    viewport: Viewport,
) -> Result<LayoutResult> {
    viewport.validate()?;
    Ok(engine::recalculate_pass(entities, opts, viewport))
}
