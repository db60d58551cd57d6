use super::{EmployeeStatus, Gender, JobRole, Site};
use crate::error::{DomainError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A person on the payroll, optionally linked to a login identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    /// Login identity; at most one employee per user
    pub user: Option<i32>,
    #[serde(flatten)]
    pub profile: EmployeeProfile,
}

/// Every employee attribute a client may set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub name: String,
    pub gender: Gender,
    pub contact: String,
    pub dob: NaiveDate,
    pub location: String,
    pub guarantor_name: String,
    pub guarantor_contact: String,
    pub job_description: JobRole,
    pub date_employed: NaiveDate,
    pub training_start: NaiveDate,
    pub training_end: NaiveDate,
    #[serde(default)]
    pub ssnit: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub status: EmployeeStatus,
    pub site: Site,
}

impl EmployeeProfile {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Name may not be blank."));
        }
        if self.contact.is_empty() || !self.contact.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::validation("Contact must contain only numbers"));
        }
        if self.training_end < self.training_start {
            return Err(DomainError::validation(
                "Training end cannot be before training start.",
            ));
        }
        Ok(())
    }
}

impl Employee {
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn role(&self) -> JobRole {
        self.profile.job_description
    }

    pub fn site(&self) -> Site {
        self.profile.site
    }

    pub fn is_active(&self) -> bool {
        self.profile.status == EmployeeStatus::Active
    }

    /// Weekly evaluations only apply to active forecourt/shop attendants
    pub fn ensure_evaluable(&self) -> Result<()> {
        if !self.role().is_attendant() {
            return Err(DomainError::validation(
                "Only Customer Champion or Service Champion can be evaluated.",
            ));
        }
        if !self.is_active() {
            return Err(DomainError::validation(
                "Only active attendants can be evaluated.",
            ));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::profile;
    use super::*;

    #[test]
    fn test_contact_must_be_digits() {
        let mut p = profile("Ama", JobRole::CustomerChampion, Site::Airport);
        assert!(p.validate().is_ok());

        p.contact = "024-123".to_string();
        assert_eq!(
            p.validate(),
            Err(DomainError::validation("Contact must contain only numbers"))
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        let p = profile("   ", JobRole::Cleaner, Site::Bohye);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_only_active_attendants_are_evaluable() {
        let mut employee = Employee {
            id: 1,
            user: None,
            profile: profile("Ama", JobRole::ServiceChampion, Site::Ofankor),
        };
        assert!(employee.ensure_evaluable().is_ok());

        employee.profile.status = EmployeeStatus::Suspended;
        assert!(employee.ensure_evaluable().is_err());

        employee.profile.status = EmployeeStatus::Active;
        employee.profile.job_description = JobRole::Security;
        assert_eq!(
            employee.ensure_evaluable(),
            Err(DomainError::validation(
                "Only Customer Champion or Service Champion can be evaluated."
            ))
        );
    }

    #[test]
    fn test_serializes_flat() {
        let employee = Employee {
            id: 7,
            user: Some(3),
            profile: profile("Ama", JobRole::CustomerChampion, Site::EastLegon),
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["user"], 3);
        assert_eq!(json["site"], "eastlegon");
        assert_eq!(json["job_description"], "customer_champion");
        assert_eq!(json["status"], "active");
    }
}
