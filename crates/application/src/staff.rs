use std::sync::Arc;

use domain::staff::{
    Captain, CaptainProfile, CaptainRepository, EmployeeProfile, EmployeeRepository,
    UserRepository,
};
use domain::{Actor, DomainError, Employee, Result, Site};
use tracing::{info, warn};

/// Employee records and the captains who supervise each site
pub struct StaffService {
    employees: Arc<dyn EmployeeRepository>,
    captains: Arc<dyn CaptainRepository>,
    users: Arc<dyn UserRepository>,
}

impl StaffService {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        captains: Arc<dyn CaptainRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            employees,
            captains,
            users,
        }
    }

    /// Create an employee. Without an explicit `user`, the employee is linked
    /// to the login whose username equals its contact number, when that login
    /// has no employee yet.
    pub async fn create_employee(
        &self,
        profile: EmployeeProfile,
        user: Option<i32>,
    ) -> Result<Employee> {
        profile.validate()?;

        let user = match user {
            Some(id) => Some(id),
            None => self.login_for_contact(&profile.contact).await?,
        };
        let employee = self.employees.create(&profile, user).await?;

        info!(
            id = employee.id,
            user = ?employee.user,
            site = %employee.site(),
            role = %employee.role(),
            "👤 Employee created"
        );
        Ok(employee)
    }

    async fn login_for_contact(&self, contact: &str) -> Result<Option<i32>> {
        let Some(user) = self.users.find_by_username(contact).await? else {
            return Ok(None);
        };
        if self.employees.find_by_user(user.id).await?.is_some() {
            warn!(user = user.id, "Login matching contact already has an employee, not linking");
            return Ok(None);
        }
        Ok(Some(user.id))
    }

    /// Replace every profile field; the user link is only changed when given
    pub async fn update_employee(
        &self,
        id: i32,
        profile: EmployeeProfile,
        user: Option<i32>,
    ) -> Result<Employee> {
        profile.validate()?;
        let mut employee = self.get_employee(id).await?;
        employee.profile = profile;
        if user.is_some() {
            employee.user = user;
        }
        self.employees.update(&employee).await?;
        info!(id, "👤 Employee updated");
        Ok(employee)
    }

    pub async fn get_employee(&self, id: i32) -> Result<Employee> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Employee", id))
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        self.employees.find_all().await
    }

    /// Deletes the employee with its evaluations and attendance marks
    pub async fn delete_employee(&self, id: i32) -> Result<()> {
        self.employees.delete(id).await?;
        info!(id, "🗑️ Employee deleted");
        Ok(())
    }

    /// Employee profile of the caller
    pub fn me(&self, actor: &Actor) -> Result<Employee> {
        actor
            .employee
            .clone()
            .ok_or_else(|| DomainError::not_found("Employee", format!("user {}", actor.user.id)))
    }

    /// Active customer and service champions
    pub async fn active_attendants(&self) -> Result<Vec<Employee>> {
        self.employees.find_active_attendants().await
    }

    /// Captains, optionally of one site, named after their employee profile
    pub async fn captains(&self, site: Option<Site>) -> Result<Vec<CaptainProfile>> {
        let captains = match site {
            Some(site) => self.captains.find_by_site(site).await?,
            None => self.captains.find_all().await?,
        };
        captain_profiles(self.employees.as_ref(), captains).await
    }
}

/// Join captains with the employee profile of their login. A captain without
/// a profile gets an empty name and no role.
pub(crate) async fn captain_profiles(
    employees: &dyn EmployeeRepository,
    captains: Vec<Captain>,
) -> Result<Vec<CaptainProfile>> {
    let mut profiles = Vec::with_capacity(captains.len());
    for captain in captains {
        let employee = employees.find_by_user(captain.user).await?;
        profiles.push(CaptainProfile {
            id: captain.id,
            name: employee
                .as_ref()
                .map(|e| e.name().to_string())
                .unwrap_or_default(),
            site: captain.site,
            job: employee.map(|e| e.role()),
        });
    }
    Ok(profiles)
}
