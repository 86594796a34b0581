//! Garment Impact Scorer Rust Implementation
//!
//! Estimates the environmental footprint of a garment from its textile
//! fiber composition: a 0-100 sustainability score, an A-F letter grade,
//! and absolute water/carbon totals scaled to the garment weight.
//!
//! Module structure:
//! - `fibers`: static per-kilogram impact reference table
//! - `garment`: garment type weight defaults
//! - `scorer`: the canonical impact calculation (pure functions)
//! - `store` / `api_server` (feature `api`): scan persistence and REST surface

pub mod fibers;
pub mod garment;
pub mod scorer;

#[cfg(feature = "api")]
pub mod store;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use fibers::{FiberFamily, FiberImpactProfile};
pub use scorer::{
    calculate_impact, calculate_impact_batch, fiber_contribution, score_to_grade,
    suggest_alternatives, FiberContribution, FiberEntry, Grade, ImpactResult,
};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};

#[cfg(feature = "api")]
pub use store::{GarmentRecord, NewScan, ScanStore, ScanType, ScanUpdate, StoreError};
