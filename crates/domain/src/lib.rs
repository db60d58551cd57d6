//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - Staff, sales, evaluation and credit records
//! - The performance calculator and score conversion
//! - Calendar bucketing and summary aggregation
//! - Repository interfaces (traits)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Business rules enforced at domain level
//! - Time-dependent logic takes "today" as an argument

pub mod credit;
pub mod error;
pub mod evaluation;
pub mod performance;
pub mod period;
pub mod sales;
pub mod scoring;
pub mod staff;
pub mod summary;

// Re-export commonly used types
pub use error::{DomainError, Result};
pub use scoring::ScoreKind;
pub use staff::{Actor, Capability, Employee, JobRole, Pump, Site};
