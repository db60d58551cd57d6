use super::entities::{captains, employees};
use super::{db_error, decode, rows_affected_or_not_found, write_error};
use async_trait::async_trait;
use domain::DomainError;
use domain::staff::{
    Captain, CaptainRepository, Employee, EmployeeProfile, EmployeeRepository, EmployeeStatus,
    JobRole, Site,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

pub struct SeaOrmEmployeeRepository {
    db: DatabaseConnection,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_employee(model: employees::Model) -> Result<Employee, DomainError> {
        Ok(Employee {
            id: model.id,
            user: model.user_id,
            profile: EmployeeProfile {
                gender: decode("employees.gender", &model.gender)?,
                job_description: decode("employees.job_description", &model.job_description)?,
                status: decode("employees.status", &model.status)?,
                site: decode("employees.site", &model.site)?,
                name: model.name,
                contact: model.contact,
                dob: model.dob,
                location: model.location,
                guarantor_name: model.guarantor_name,
                guarantor_contact: model.guarantor_contact,
                date_employed: model.date_employed,
                training_start: model.training_start,
                training_end: model.training_end,
                ssnit: model.ssnit,
                account: model.account,
            },
        })
    }

    fn active_model(profile: &EmployeeProfile, user: Option<i32>) -> employees::ActiveModel {
        employees::ActiveModel {
            user_id: Set(user),
            name: Set(profile.name.clone()),
            gender: Set(profile.gender.as_str().to_string()),
            contact: Set(profile.contact.clone()),
            dob: Set(profile.dob),
            location: Set(profile.location.clone()),
            guarantor_name: Set(profile.guarantor_name.clone()),
            guarantor_contact: Set(profile.guarantor_contact.clone()),
            job_description: Set(profile.job_description.as_str().to_string()),
            date_employed: Set(profile.date_employed),
            training_start: Set(profile.training_start),
            training_end: Set(profile.training_end),
            ssnit: Set(profile.ssnit.clone()),
            account: Set(profile.account.clone()),
            status: Set(profile.status.as_str().to_string()),
            site: Set(profile.site.as_str().to_string()),
            ..Default::default()
        }
    }

    fn collect(models: Vec<employees::Model>) -> Result<Vec<Employee>, DomainError> {
        models.into_iter().map(Self::model_to_employee).collect()
    }
}

fn duplicate_user(user: Option<i32>) -> String {
    match user {
        Some(id) => format!("User with ID {} already has an employee profile.", id),
        None => "Employee already exists.".to_string(),
    }
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn create(
        &self,
        profile: &EmployeeProfile,
        user: Option<i32>,
    ) -> Result<Employee, DomainError> {
        let model = Self::active_model(profile, user)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, || duplicate_user(user)))?;

        tracing::debug!(employee_id = model.id, "Employee created");
        Self::model_to_employee(model)
    }

    async fn update(&self, employee: &Employee) -> Result<(), DomainError> {
        let mut active = Self::active_model(&employee.profile, employee.user);
        active.id = Set(employee.id);

        let result = employees::Entity::update_many()
            .set(active)
            .filter(employees::Column::Id.eq(employee.id))
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, || duplicate_user(employee.user)))?;

        rows_affected_or_not_found(result.rows_affected, "Employee", employee.id)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, DomainError> {
        employees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(Self::model_to_employee)
            .transpose()
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Option<Employee>, DomainError> {
        employees::Entity::find()
            .filter(employees::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(Self::model_to_employee)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<Employee>, DomainError> {
        let models = employees::Entity::find()
            .order_by_asc(employees::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Self::collect(models)
    }

    async fn find_active_attendants(&self) -> Result<Vec<Employee>, DomainError> {
        let models = employees::Entity::find()
            .filter(employees::Column::Status.eq(EmployeeStatus::Active.as_str()))
            .filter(employees::Column::JobDescription.is_in([
                JobRole::CustomerChampion.as_str(),
                JobRole::ServiceChampion.as_str(),
            ]))
            .order_by_asc(employees::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Self::collect(models)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = employees::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;
        rows_affected_or_not_found(result.rows_affected, "Employee", id)
    }
}

pub struct SeaOrmCaptainRepository {
    db: DatabaseConnection,
}

impl SeaOrmCaptainRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Designate `user` as a captain of `site`
    pub async fn create(&self, user: i32, site: Site) -> Result<Captain, DomainError> {
        let model = captains::ActiveModel {
            user_id: Set(user),
            site: Set(site.as_str().to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, || "This user is already a captain.".to_string()))?;
        Self::model_to_captain(model)
    }

    fn model_to_captain(model: captains::Model) -> Result<Captain, DomainError> {
        Ok(Captain {
            id: model.id,
            user: model.user_id,
            site: decode("captains.site", &model.site)?,
        })
    }
}

#[async_trait]
impl CaptainRepository for SeaOrmCaptainRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Captain>, DomainError> {
        captains::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(Self::model_to_captain)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<Captain>, DomainError> {
        captains::Entity::find()
            .order_by_asc(captains::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(Self::model_to_captain)
            .collect()
    }

    async fn find_by_site(&self, site: Site) -> Result<Vec<Captain>, DomainError> {
        captains::Entity::find()
            .filter(captains::Column::Site.eq(site.as_str()))
            .order_by_asc(captains::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(Self::model_to_captain)
            .collect()
    }
}
