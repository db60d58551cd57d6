use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(150)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::IsCaptain)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::IsManager)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::IsSupervisor)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::IsNoRole)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create auth_tokens table (one token per user)
        manager
            .create_table(
                Table::create()
                    .table(AuthTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuthTokens::Key)
                            .string_len(40)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AuthTokens::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(AuthTokens::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_auth_token_user")
                            .from(AuthTokens::Table, AuthTokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create employees table
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::UserId).integer().unique_key())
                    .col(ColumnDef::new(Employees::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Employees::Gender).string_len(6).not_null())
                    .col(ColumnDef::new(Employees::Contact).string_len(20).not_null())
                    .col(ColumnDef::new(Employees::Dob).date().not_null())
                    .col(ColumnDef::new(Employees::Location).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Employees::GuarantorName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::GuarantorContact)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::JobDescription)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::DateEmployed).date().not_null())
                    .col(ColumnDef::new(Employees::TrainingStart).date().not_null())
                    .col(ColumnDef::new(Employees::TrainingEnd).date().not_null())
                    .col(ColumnDef::new(Employees::Ssnit).string_len(20))
                    .col(ColumnDef::new(Employees::Account).string_len(20))
                    .col(
                        ColumnDef::new(Employees::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Employees::Site).string_len(15).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_user")
                            .from(Employees::Table, Employees::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create captains table
        manager
            .create_table(
                Table::create()
                    .table(Captains::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Captains::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Captains::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Captains::Site).string_len(15).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_captain_user")
                            .from(Captains::Table, Captains::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employees_site")
                    .table(Employees::Table)
                    .col(Employees::Site)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Captains::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AuthTokens::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    IsCaptain,
    IsManager,
    IsSupervisor,
    IsNoRole,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AuthTokens {
    Table,
    Key,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Employees {
    Table,
    Id,
    UserId,
    Name,
    Gender,
    Contact,
    Dob,
    Location,
    GuarantorName,
    GuarantorContact,
    JobDescription,
    DateEmployed,
    TrainingStart,
    TrainingEnd,
    Ssnit,
    Account,
    Status,
    Site,
}

#[derive(DeriveIden)]
pub(crate) enum Captains {
    Table,
    Id,
    UserId,
    Site,
}
