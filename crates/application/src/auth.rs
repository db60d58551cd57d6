use std::sync::Arc;

use domain::staff::{EmployeeRepository, UserRepository};
use domain::{Actor, DomainError, JobRole, Result};
use infrastructure::auth::verify_password;
use serde::Serialize;
use tracing::{info, warn};

/// Token plus everything the client shows about the logged-in user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Employee id
    pub mid: Option<i32>,
    /// User id
    pub usid: i32,
    pub username: String,
    pub employee_name: Option<String>,
    #[serde(rename = "isCaptain")]
    pub is_captain: bool,
    #[serde(rename = "isManager")]
    pub is_manager: bool,
    #[serde(rename = "isSupervisor")]
    pub is_supervisor: bool,
    #[serde(rename = "isnoRole")]
    pub is_no_role: bool,
    pub job: Option<JobRole>,
}

/// Password login and token lookup
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, employees: Arc<dyn EmployeeRepository>) -> Self {
        Self { users, employees }
    }

    /// Exchange credentials for the user's API token, issuing one on first login
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => {
                warn!(username, "🔒 Login for unknown username");
                return Err(bad_credentials());
            }
        };

        // Hash verification blocks; run it on the blocking pool
        let password = password.to_owned();
        let hash = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(DomainError::repository)?;
        if !verified {
            warn!(username, "🔒 Login with wrong password");
            return Err(bad_credentials());
        }

        let token = self.users.get_or_create_token(user.id).await?;
        let employee = self.employees.find_by_user(user.id).await?;
        info!(user = user.id, "🔑 Logged in");

        Ok(LoginResponse {
            token,
            mid: employee.as_ref().map(|e| e.id),
            usid: user.id,
            username: user.username,
            employee_name: employee.as_ref().map(|e| e.name().to_string()),
            is_captain: user.is_captain,
            is_manager: user.is_manager,
            is_supervisor: user.is_supervisor,
            is_no_role: user.is_no_role,
            job: employee.map(|e| e.role()),
        })
    }

    /// Resolve a token key to the caller it belongs to
    pub async fn authenticate(&self, token: &str) -> Result<Actor> {
        let user = self
            .users
            .find_by_token(token)
            .await?
            .ok_or(DomainError::Unauthenticated)?;
        let employee = self.employees.find_by_user(user.id).await?;
        Ok(Actor { user, employee })
    }
}

fn bad_credentials() -> DomainError {
    DomainError::validation("Unable to log in with provided credentials.")
}
