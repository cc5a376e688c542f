#![allow(dead_code)]

use axum::Router;
use chrono::NaiveDate;
use crudbase::{AuditStamper, CrudService, StaticPrincipal, crud_router};
use sea_orm::{Database, DatabaseConnection, DbErr, Schema};
use sea_orm_migration::prelude::*;
use std::sync::Arc;

pub mod country_entity;
pub mod customer_entity;
pub mod device_entity;

pub use country_entity::{CountryDto, CountryMapper};
pub use customer_entity::{CustomerDto, CustomerMapper};
pub use device_entity::{DeviceDto, DeviceMapper};

pub type CustomerService =
    CrudService<customer_entity::Entity, CustomerDto, CustomerMapper>;
pub type CountryService = CrudService<country_entity::Entity, CountryDto, CountryMapper>;
pub type DeviceService = CrudService<device_entity::Entity, DeviceDto, DeviceMapper>;

// Helper function to get database URL from environment or default to SQLite
fn get_test_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string())
}

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(&get_test_database_url()).await?;
    Migrator::down(&db, None).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Fixed audit date so stamped values can be asserted.
pub fn audit_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 18).unwrap()
}

pub fn customer_service(db: DatabaseConnection) -> CustomerService {
    CrudService::with_sea_orm(db, CustomerMapper).with_audit_stamper(
        AuditStamper::new(Arc::new(StaticPrincipal("alice".to_string()))).with_clock(audit_day),
    )
}

pub fn country_service(db: DatabaseConnection) -> CountryService {
    CrudService::with_sea_orm(db, CountryMapper)
}

pub fn device_service(db: DatabaseConnection) -> DeviceService {
    CrudService::with_sea_orm(db, DeviceMapper)
}

/// Insert the given customers in order; ids are assigned 1, 2, 3, ...
pub async fn seed_customers(service: &CustomerService, customers: &[(&str, &str, i32)]) {
    for (name, email, age) in customers {
        service
            .post(CustomerDto::new(name, email, *age))
            .await
            .expect("Failed to seed customer");
    }
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    let customers = Arc::new(customer_service(db.clone()));
    let countries = Arc::new(country_service(db));

    Router::new()
        .nest("/customers", crud_router(customers))
        .nest("/countries", crud_router(countries))
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateTables)]
    }
}

pub struct CreateTables;

impl MigrationName for CreateTables {
    fn name(&self) -> &'static str {
        "m20250118_000001_create_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateTables {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());
        manager
            .create_table(schema.create_table_from_entity(customer_entity::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(country_entity::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(device_entity::Entity))
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(customer_entity::Entity)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(country_entity::Entity)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(device_entity::Entity)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
