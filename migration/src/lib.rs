use sea_orm_migration::prelude::*;
pub use sea_orm_migration::prelude::{MigrationTrait, MigratorTrait};

mod m20250901_000001_create_base_tables;
mod m20250901_000002_create_periods;
mod m20250901_000003_create_registrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_base_tables::Migration),
            Box::new(m20250901_000002_create_periods::Migration),
            Box::new(m20250901_000003_create_registrations::Migration),
        ]
    }
}
