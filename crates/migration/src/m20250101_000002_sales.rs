use crate::m20250101_000001_staff::{Captains, Users};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create pump_targets table
        manager
            .create_table(
                Table::create()
                    .table(PumpTargets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PumpTargets::Site).string_len(15).not_null())
                    .col(ColumnDef::new(PumpTargets::Pump).string_len(10).not_null())
                    .col(
                        ColumnDef::new(PumpTargets::Target)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PumpTargets::Site)
                            .col(PumpTargets::Pump),
                    )
                    .to_owned(),
            )
            .await?;

        // Create shop_targets table
        manager
            .create_table(
                Table::create()
                    .table(ShopTargets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShopTargets::Site)
                            .string_len(15)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ShopTargets::Target)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create fuel_sales table
        manager
            .create_table(
                Table::create()
                    .table(FuelSales::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FuelSales::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FuelSales::UserId).integer().not_null())
                    .col(ColumnDef::new(FuelSales::Date).date().not_null())
                    .col(ColumnDef::new(FuelSales::Pump).string_len(10).not_null())
                    .col(ColumnDef::new(FuelSales::CaptainId).integer().not_null())
                    .col(
                        ColumnDef::new(FuelSales::PmsSales)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(FuelSales::DxSales)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(FuelSales::VpSales)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(FuelSales::Performance).decimal_len(8, 2))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fuel_sales_user")
                            .from(FuelSales::Table, FuelSales::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fuel_sales_captain")
                            .from(FuelSales::Table, FuelSales::CaptainId)
                            .to(Captains::Table, Captains::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_fuel_sales_user_date")
                    .table(FuelSales::Table)
                    .col(FuelSales::UserId)
                    .col(FuelSales::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create shop_sales table
        manager
            .create_table(
                Table::create()
                    .table(ShopSales::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShopSales::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ShopSales::UserId).integer().not_null())
                    .col(ColumnDef::new(ShopSales::Date).date().not_null())
                    .col(ColumnDef::new(ShopSales::CaptainId).integer().not_null())
                    .col(
                        ColumnDef::new(ShopSales::Sales)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ShopSales::Performance).decimal_len(8, 2))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shop_sales_user")
                            .from(ShopSales::Table, ShopSales::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shop_sales_captain")
                            .from(ShopSales::Table, ShopSales::CaptainId)
                            .to(Captains::Table, Captains::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_shop_sales_user_date")
                    .table(ShopSales::Table)
                    .col(ShopSales::UserId)
                    .col(ShopSales::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShopSales::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(FuelSales::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ShopTargets::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(PumpTargets::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum PumpTargets {
    Table,
    Site,
    Pump,
    Target,
}

#[derive(DeriveIden)]
enum ShopTargets {
    Table,
    Site,
    Target,
}

#[derive(DeriveIden)]
enum FuelSales {
    Table,
    Id,
    UserId,
    Date,
    Pump,
    CaptainId,
    PmsSales,
    DxSales,
    VpSales,
    Performance,
}

#[derive(DeriveIden)]
enum ShopSales {
    Table,
    Id,
    UserId,
    Date,
    CaptainId,
    Sales,
    Performance,
}
