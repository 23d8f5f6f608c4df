use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
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
                    .col(
                        ColumnDef::new(Employees::FirstName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::LastName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create pin_credentials table. The employee_id primary key doubles as
        // the one-credential-per-employee constraint.
        manager
            .create_table(
                Table::create()
                    .table(PinCredentials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PinCredentials::EmployeeId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PinCredentials::PinHash)
                            .binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PinCredentials::Salt)
                            .binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PinCredentials::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pin_credentials_employee_id")
                            .from(PinCredentials::Table, PinCredentials::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The admin status page lists employees alphabetically; index the
        // picker's filter column as well.
        manager
            .create_index(
                Index::create()
                    .name("idx_employees_active")
                    .table(Employees::Table)
                    .col(Employees::Active)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PinCredentials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    FirstName,
    LastName,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PinCredentials {
    Table,
    EmployeeId,
    PinHash,
    Salt,
    UpdatedAt,
}
