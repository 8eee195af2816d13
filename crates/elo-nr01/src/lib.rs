//! Psychosocial risk scoring for HSE-IT based NR-01 diagnostics.
//!
//! The [`assessment`] module holds the engine: the question catalog, answer
//! normalization, dimension and company scores, the per-question heat-map,
//! history buckets, and the recommendation rules. Persistence is reached only
//! through the repository traits so the engine itself stays pure.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
