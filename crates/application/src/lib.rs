//! Application layer - Use cases: recording, scoring and summarising

pub mod auth;
pub mod credit;
pub mod evaluation;
pub mod sales;
pub mod staff;
pub mod summary;
pub mod targets;

pub use auth::{AuthService, LoginResponse};
pub use credit::CreditService;
pub use evaluation::EvaluationService;
pub use sales::SalesService;
pub use staff::StaffService;
pub use summary::{SummaryService, SummaryWindow};
pub use targets::TargetService;
