use sea_orm_migration::prelude::*;

use crate::m20250212_101500_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum Vendors {
    Table,
    Id,
    VendorName,
    CompanyName,
    Email,
    Contact,
    Address,
    Profile,
    BuilderId,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vendors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vendors::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vendors::VendorName).string().not_null())
                    .col(ColumnDef::new(Vendors::CompanyName).string().not_null())
                    .col(ColumnDef::new(Vendors::Email).string().not_null())
                    .col(ColumnDef::new(Vendors::Contact).string().not_null())
                    .col(ColumnDef::new(Vendors::Address).string().not_null())
                    .col(ColumnDef::new(Vendors::Profile).string())
                    .col(ColumnDef::new(Vendors::BuilderId).string().not_null())
                    .col(ColumnDef::new(Vendors::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-vendors-builder_id")
                            .from(Vendors::Table, Vendors::BuilderId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-vendors-builder_id")
                    .table(Vendors::Table)
                    .col(Vendors::BuilderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vendors::Table).to_owned())
            .await
    }
}
