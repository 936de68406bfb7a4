pub use sea_orm_migration::prelude::*;

mod m20250212_101500_users;
mod m20250212_103000_projects;
mod m20250213_091000_budgets;
mod m20250214_110000_vendors;
mod m20250215_120000_transactions;
mod m20250216_143000_notifications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250212_101500_users::Migration),
            Box::new(m20250212_103000_projects::Migration),
            Box::new(m20250213_091000_budgets::Migration),
            Box::new(m20250214_110000_vendors::Migration),
            Box::new(m20250215_120000_transactions::Migration),
            Box::new(m20250216_143000_notifications::Migration),
        ]
    }
}
