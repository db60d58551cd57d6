use super::{Captain, Employee, EmployeeProfile, Site, User};
use crate::DomainError;
use async_trait::async_trait;

/// Repository interface for employee persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Insert a new employee; fails with `Duplicate` if `user` already has one
    async fn create(&self, profile: &EmployeeProfile, user: Option<i32>)
    -> Result<Employee, DomainError>;

    async fn update(&self, employee: &Employee) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, DomainError>;

    async fn find_by_user(&self, user_id: i32) -> Result<Option<Employee>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Employee>, DomainError>;

    /// Active customer/service champions
    async fn find_active_attendants(&self) -> Result<Vec<Employee>, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptainRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Captain>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Captain>, DomainError>;

    async fn find_by_site(&self, site: Site) -> Result<Vec<Captain>, DomainError>;
}

/// Login identities and their API tokens
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<User>, DomainError>;

    /// Return the user's existing token, creating one on first login
    async fn get_or_create_token(&self, user_id: i32) -> Result<String, DomainError>;
}
