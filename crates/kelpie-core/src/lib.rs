#![forbid(unsafe_code)]

//! Interaction-history aggregation + adaptive entity state model (headless).
//!
//! Design goals:
//! - deterministic, testable outputs (fixed-clock override, seeded initial visuals)
//! - explicit ownership of every buffer; copy-on-read snapshots at the boundary
//! - no rendering, input capture, or timers: the host application drives the store and
//!   consumes entity snapshots plus derived spring parameters

pub mod config;
pub mod entities;
pub mod error;
pub mod palette;
pub mod rng;
pub mod spring;
pub mod store;
pub mod time;
pub mod tracker;

pub use config::PopulationConfig;
pub use entities::{
    Entity, EntityId, EntityUpdate, InteractionHistory, InteractionKind, InteractionState, Point,
    Shape, VisualState,
};
pub use error::{Error, Result};
pub use spring::{REDUCED_MOTION_SPRING, SpringConfig, derive_layout_spring, derive_spring};
pub use store::EntityStore;
pub use tracker::InteractionTracker;
