//! Data-driven seeding for the survey database.
//!
//! This crate loads survey submission payloads from a JSON fixture, persists
//! each payload as one atomic set of writes (user upsert, survey row, four
//! detail rows), and verifies the writes landed.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use survey_seed::prelude::*;
//!
//! let config = SeedConfig::from_env();
//! let summary = runner::run(&pool, &config).await?;
//! for record in &summary.records {
//!     println!("{} -> survey {}", record.email, record.survey_id);
//! }
//! ```

pub mod config;
pub mod db;
pub mod loader;
pub mod payload;
pub mod runner;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{DbConfig, SeedConfig};
    pub use crate::db::{SeedError, SeededRecord, Seeder, Verifier, VerifyError};
    pub use crate::loader::{LoadError, SeedFileLoader};
    pub use crate::payload::SeedPayload;
    pub use crate::runner::{self, RunError, RunSummary};
}
