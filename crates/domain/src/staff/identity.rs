use super::{JobRole, Site};
use serde::{Deserialize, Serialize};

/// Login identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_captain: bool,
    pub is_manager: bool,
    pub is_supervisor: bool,
    pub is_no_role: bool,
}

/// A login identity designated to supervise sales at one site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Captain {
    pub id: i32,
    pub user: i32,
    pub site: Site,
}

/// Captain joined with the employee profile of its user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptainProfile {
    pub id: i32,
    pub name: String,
    pub site: Site,
    #[serde(skip)]
    pub job: Option<JobRole>,
}

/// The authenticated caller of a request
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub user: User,
    pub employee: Option<super::Employee>,
}

impl Actor {
    pub fn role(&self) -> Option<JobRole> {
        self.employee.as_ref().map(|e| e.role())
    }

    pub fn site(&self) -> Option<Site> {
        self.employee.as_ref().map(|e| e.site())
    }
}
