use crate::m20250101_000001_staff::Users;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create customers table
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customers::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Customers::Contact).string_len(20).not_null())
                    .to_owned(),
            )
            .await?;

        // Create credit_sales table
        manager
            .create_table(
                Table::create()
                    .table(CreditSales::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CreditSales::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CreditSales::UserId).integer().not_null())
                    .col(ColumnDef::new(CreditSales::Date).date().not_null())
                    .col(ColumnDef::new(CreditSales::CustomerId).integer().not_null())
                    .col(ColumnDef::new(CreditSales::CarNumber).string_len(20).not_null())
                    .col(ColumnDef::new(CreditSales::Litres).decimal_len(12, 2))
                    .col(
                        ColumnDef::new(CreditSales::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_sale_user")
                            .from(CreditSales::Table, CreditSales::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_sale_customer")
                            .from(CreditSales::Table, CreditSales::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create credit_collections table
        manager
            .create_table(
                Table::create()
                    .table(CreditCollections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CreditCollections::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CreditCollections::CustomerId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CreditCollections::Date).date().not_null())
                    .col(
                        ColumnDef::new(CreditCollections::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_collection_customer")
                            .from(CreditCollections::Table, CreditCollections::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CreditCollections::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CreditSales::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
    Name,
    Contact,
}

#[derive(DeriveIden)]
enum CreditSales {
    Table,
    Id,
    UserId,
    Date,
    CustomerId,
    CarNumber,
    Litres,
    Amount,
}

#[derive(DeriveIden)]
enum CreditCollections {
    Table,
    Id,
    CustomerId,
    Date,
    Amount,
}
