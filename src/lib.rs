//! # crudbase
//!
//! Generic CRUD services for Sea-ORM entities, with dynamic search predicates and
//! query-by-example, exposed over Axum.
//!
//! An entity opts in by implementing [`CrudEntity`] on its Sea-ORM `Entity`; a DTO implements
//! [`BaseDto`] (and optionally [`Validatable`]); a [`Mapper`] converts between the two. A
//! [`CrudService`] then provides `get`, `get_all`, `get_by_example`, the paged variants,
//! `search`, `post`, `put` and `delete`, and [`crud_router`] serves them over HTTP.
//!
//! ```rust,ignore
//! use crudbase::{CrudService, crud_router};
//! use std::sync::Arc;
//!
//! let service = Arc::new(CrudService::with_sea_orm(db, CustomerMapper));
//! let app = axum::Router::new().nest("/customers", crud_router(service));
//! ```
//!
//! Records are never physically deleted: `delete` flags the row, and flagged rows are invisible
//! to every read.

pub mod audit;
pub mod config;
pub mod core;
pub mod errors;
pub mod filtering;
pub mod messages;
pub mod models;
pub mod repository;
pub mod routes;
pub mod validation;

#[cfg(test)]
mod test_fixtures;

pub use audit::{Anonymous, AuditColumns, AuditStamper, PrincipalProvider, StaticPrincipal};
pub use config::CrudConfig;
pub use crate::core::{CrudEntity, CrudService, Mapper};
pub use errors::{ApiError, CriteriaError, CrudError};
pub use filtering::{
    Criteria, FieldKind, Page, PageParams, Pageable, PredicateCompiler, SearchField,
    SearchFieldCriteria, SearchOperation, SortDirection, SortOrder,
};
pub use messages::{MessageCatalog, MessageSource};
pub use models::{AuditFields, BaseDto};
pub use repository::{Repository, SeaOrmRepository};
pub use routes::crud_router;
pub use validation::{Validatable, ValidationError, ValidationErrors, ValidationGroup};
