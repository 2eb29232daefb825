pub use sea_orm_migration::prelude::*;

mod m20250304_105428_create_users_table;
mod m20250304_110102_create_user_tokens_table;
mod m20250306_091500_create_catalog_tables;
mod m20250306_093000_create_basket_and_rating_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250304_105428_create_users_table::Migration),
            Box::new(m20250304_110102_create_user_tokens_table::Migration),
            Box::new(m20250306_091500_create_catalog_tables::Migration),
            Box::new(m20250306_093000_create_basket_and_rating_tables::Migration),
        ]
    }
}
