//! Database integration for seeding survey payloads.
//!
//! The [`Seeder`] applies one payload per transaction; the [`Verifier`]
//! smoke-checks committed surveys afterwards.

mod seeder;
mod verifier;

pub use seeder::{SeedError, SeededRecord, Seeder};
pub use verifier::{Verifier, VerifyError};
