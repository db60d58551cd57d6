use super::{Actor, JobRole};
use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Privileged actions gated on who the caller is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Submit the daily attendance register
    MarkAttendance,
    /// Submit weekly soft-skill evaluations
    EvaluateAttendants,
    /// Record money collected from credit customers
    RecordCreditCollection,
    /// Overwrite pump/shop targets and trigger performance recomputes
    ManageTargets,
}

impl Capability {
    pub fn is_granted_to(self, actor: &Actor) -> bool {
        let role = actor.role();
        match self {
            Self::MarkAttendance => actor.user.is_captain,
            Self::EvaluateAttendants => {
                actor.user.is_captain
                    || actor.user.is_manager
                    || actor.user.is_supervisor
                    || role.is_some_and(role_supervises)
            }
            Self::RecordCreditCollection => role.is_some_and(role_handles_cash),
            Self::ManageTargets => {
                actor.user.is_manager || matches!(role, Some(JobRole::Manager))
            }
        }
    }

    pub fn require(self, actor: &Actor) -> Result<()> {
        if self.is_granted_to(actor) {
            Ok(())
        } else {
            Err(DomainError::PermissionDenied(self.denial_message().to_string()))
        }
    }

    fn denial_message(self) -> &'static str {
        match self {
            Self::MarkAttendance => "Only Captains can mark attendance.",
            Self::EvaluateAttendants => "Only Captains, Managers or Supervisors can evaluate attendants.",
            Self::RecordCreditCollection => {
                "Only Managers or Supervisors can record credit collections."
            }
            Self::ManageTargets => "Only Managers can change targets.",
        }
    }
}

fn role_supervises(role: JobRole) -> bool {
    match role {
        JobRole::Manager | JobRole::Supervisor | JobRole::QualityMarshal => true,
        JobRole::CustomerChampion
        | JobRole::ServiceChampion
        | JobRole::LubeTechnician
        | JobRole::OilSpecialist
        | JobRole::Cleaner
        | JobRole::Security
        | JobRole::Driver => false,
    }
}

fn role_handles_cash(role: JobRole) -> bool {
    match role {
        JobRole::Manager | JobRole::Supervisor => true,
        JobRole::QualityMarshal
        | JobRole::CustomerChampion
        | JobRole::ServiceChampion
        | JobRole::LubeTechnician
        | JobRole::OilSpecialist
        | JobRole::Cleaner
        | JobRole::Security
        | JobRole::Driver => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staff::employee::fixtures::profile;
    use crate::staff::{Employee, Site, User};

    fn actor(role: Option<JobRole>, is_captain: bool) -> Actor {
        Actor {
            user: User {
                id: 1,
                username: "0240000000".to_string(),
                password_hash: String::new(),
                is_captain,
                is_manager: false,
                is_supervisor: false,
                is_no_role: !is_captain,
            },
            employee: role.map(|r| Employee {
                id: 10,
                user: Some(1),
                profile: profile("Kwame", r, Site::Palmwine),
            }),
        }
    }

    #[test]
    fn test_only_captains_mark_attendance() {
        assert!(Capability::MarkAttendance.is_granted_to(&actor(Some(JobRole::CustomerChampion), true)));
        let err = Capability::MarkAttendance
            .require(&actor(Some(JobRole::Manager), false))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::PermissionDenied("Only Captains can mark attendance.".to_string())
        );
    }

    #[test]
    fn test_credit_collection_requires_manager_or_supervisor_role() {
        assert!(Capability::RecordCreditCollection.is_granted_to(&actor(Some(JobRole::Manager), false)));
        assert!(Capability::RecordCreditCollection.is_granted_to(&actor(Some(JobRole::Supervisor), false)));
        assert!(!Capability::RecordCreditCollection.is_granted_to(&actor(Some(JobRole::Driver), true)));
        assert!(!Capability::RecordCreditCollection.is_granted_to(&actor(None, false)));
    }

    #[test]
    fn test_manage_targets() {
        assert!(Capability::ManageTargets.is_granted_to(&actor(Some(JobRole::Manager), false)));
        assert!(!Capability::ManageTargets.is_granted_to(&actor(Some(JobRole::Supervisor), false)));

        let mut flagged = actor(None, false);
        flagged.user.is_manager = true;
        assert!(Capability::ManageTargets.is_granted_to(&flagged));
    }

    #[test]
    fn test_evaluators() {
        assert!(Capability::EvaluateAttendants.is_granted_to(&actor(Some(JobRole::QualityMarshal), false)));
        assert!(Capability::EvaluateAttendants.is_granted_to(&actor(Some(JobRole::CustomerChampion), true)));
        assert!(!Capability::EvaluateAttendants.is_granted_to(&actor(Some(JobRole::Cleaner), false)));
    }
}
