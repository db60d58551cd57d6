use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Declares a string-coded enumeration with `as_str`, `ALL`, `Display` and `FromStr`.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($code) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(DomainError::Validation(format!(
                    "\"{}\" is not a valid {}.",
                    s, $label
                )))
            }
        }
    };
}

coded_enum! {
    /// Physical fuel-station location
    Site, "site" {
        Ofankor => "ofankor",
        Palmwine => "palmwine",
        EastLegon => "eastlegon",
        AchimotaKsi => "achimota_ksi",
        AchimotaAbofu => "achimota_abofu",
        Bohye => "bohye",
        Airport => "airport",
    }
}

coded_enum! {
    Pump, "pump" {
        Pump1 => "pump1",
        Pump2 => "pump2",
        Pump3 => "pump3",
        Pump4 => "pump4",
        Pump5 => "pump5",
    }
}

coded_enum! {
    /// Job description of an employee
    JobRole, "job description" {
        Manager => "manager",
        Supervisor => "supervisor",
        QualityMarshal => "quality_marshal",
        CustomerChampion => "customer_champion",
        ServiceChampion => "service_champion",
        LubeTechnician => "lube_technician",
        OilSpecialist => "oil_specialist",
        Cleaner => "cleaner",
        Security => "security",
        Driver => "driver",
    }
}

coded_enum! {
    EmployeeStatus, "status" {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
        Terminated => "terminated",
    }
}

coded_enum! {
    Gender, "gender" {
        Male => "M",
        Female => "F",
    }
}

impl JobRole {
    /// Attendants on the forecourt and in the shop; the only roles that receive
    /// weekly evaluations.
    pub fn is_attendant(&self) -> bool {
        matches!(self, Self::CustomerChampion | Self::ServiceChampion)
    }
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        Self::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_codes_round_trip_through_from_str() {
        for site in Site::ALL {
            assert_eq!(site.as_str().parse::<Site>().unwrap(), *site);
        }
        assert_eq!("EastLegon".parse::<Site>().unwrap(), Site::EastLegon);
    }

    #[test]
    fn test_invalid_code_is_validation_error() {
        let err = "tema".parse::<Site>().unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation("\"tema\" is not a valid site.".to_string())
        );
    }

    #[test]
    fn test_serde_uses_storage_codes() {
        assert_eq!(
            serde_json::to_string(&JobRole::CustomerChampion).unwrap(),
            "\"customer_champion\""
        );
        let pump: Pump = serde_json::from_str("\"pump3\"").unwrap();
        assert_eq!(pump, Pump::Pump3);
    }

    #[test]
    fn test_attendant_roles() {
        assert!(JobRole::CustomerChampion.is_attendant());
        assert!(JobRole::ServiceChampion.is_attendant());
        assert!(!JobRole::Manager.is_attendant());
        assert!(!JobRole::Cleaner.is_attendant());
    }

    #[test]
    fn test_default_status_is_active() {
        assert_eq!(EmployeeStatus::default(), EmployeeStatus::Active);
    }
}
