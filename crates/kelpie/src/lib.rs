#![forbid(unsafe_code)]

//! Adaptive ambient-entity engine (headless).
//!
//! A small population of on-screen entities continuously adapts its visual and positional
//! state to observed interaction patterns: raw pointer events are aggregated into rolling
//! per-entity statistics, which drive visual adaptation, spring-parameter derivation, and a
//! periodic force-directed layout pass. Rendering, pointer capture, and frame-by-frame
//! interpolation are external concerns; this crate only transforms snapshots.
//!
//! [`Session`] wires the pieces together; `kelpie-core` and `selkie` are usable on their own.

mod session;

pub use kelpie_core::{
    Entity, EntityId, EntityStore, EntityUpdate, InteractionHistory, InteractionKind,
    InteractionState, InteractionTracker, Point, PopulationConfig, REDUCED_MOTION_SPRING, Shape,
    SpringConfig, VisualState, derive_layout_spring, derive_spring,
};
pub use kelpie_core::time;
pub use selkie::{EngagementSignals, LayoutOptions, LayoutResult, Viewport};
pub use session::Session;
