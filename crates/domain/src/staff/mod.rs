mod capability;
mod employee;
mod enums;
mod identity;
mod repository;

pub use capability::Capability;
pub use employee::{Employee, EmployeeProfile};
pub use enums::{EmployeeStatus, Gender, JobRole, Pump, Site};
pub use identity::{Actor, Captain, CaptainProfile, User};
pub use repository::{CaptainRepository, EmployeeRepository, UserRepository};

