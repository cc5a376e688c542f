//! Audit-column stamping for entities that declare
//! [`CrudEntity::AUDIT_COLUMNS`](crate::CrudEntity::AUDIT_COLUMNS).
//!
//! On insert, `created_at`/`created_by` are set to today and the current principal, and the
//! `updated_*` pair is cleared. On update (including logical delete), the `created_*` pair is
//! carried over from the stored record and `updated_*` is set. Values supplied by the caller
//! never reach these columns.

use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ModelTrait, Value};
use std::fmt;
use std::sync::Arc;

use crate::core::CrudEntity;

/// The four audit columns of one entity.
#[derive(Debug, Clone, Copy)]
pub struct AuditColumns<C> {
    pub created_at: C,
    pub updated_at: C,
    pub created_by: C,
    pub updated_by: C,
}

/// Supplies the name recorded in `created_by`/`updated_by`.
pub trait PrincipalProvider: Send + Sync {
    /// `None` when nobody is authenticated.
    fn current_principal(&self) -> Option<String>;
}

/// Nobody is authenticated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl PrincipalProvider for Anonymous {
    fn current_principal(&self) -> Option<String> {
        None
    }
}

/// Always the same principal, e.g. a service account.
#[derive(Debug, Clone)]
pub struct StaticPrincipal(pub String);

impl PrincipalProvider for StaticPrincipal {
    fn current_principal(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

impl<F> PrincipalProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn current_principal(&self) -> Option<String> {
        self()
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Applies audit values to active models before they are written.
#[derive(Clone)]
pub struct AuditStamper {
    principal: Arc<dyn PrincipalProvider>,
    clock: fn() -> NaiveDate,
}

impl fmt::Debug for AuditStamper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditStamper").finish_non_exhaustive()
    }
}

impl Default for AuditStamper {
    fn default() -> Self {
        Self::new(Arc::new(Anonymous))
    }
}

impl AuditStamper {
    #[must_use]
    pub fn new(principal: Arc<dyn PrincipalProvider>) -> Self {
        Self {
            principal,
            clock: today,
        }
    }

    /// Replace the date source.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// Stamp a record about to be inserted. No-op for entities without audit columns.
    pub fn pre_persist<E: CrudEntity>(&self, active: &mut E::ActiveModelType) {
        let Some(columns) = E::AUDIT_COLUMNS else {
            return;
        };
        let principal = self.principal.current_principal();
        tracing::trace!(entity = E::RESOURCE_NAME_SINGULAR, ?principal, "Stamping insert");

        active.set(columns.created_at, Value::from(Some((self.clock)())));
        active.set(columns.created_by, Value::from(principal));
        active.set(columns.updated_at, Value::from(None::<NaiveDate>));
        active.set(columns.updated_by, Value::from(None::<String>));
    }

    /// Stamp a record about to overwrite `existing`. No-op for entities without audit columns.
    pub fn pre_update<E: CrudEntity>(&self, active: &mut E::ActiveModelType, existing: &E::Model) {
        let Some(columns) = E::AUDIT_COLUMNS else {
            return;
        };
        let principal = self.principal.current_principal();
        tracing::trace!(entity = E::RESOURCE_NAME_SINGULAR, ?principal, "Stamping update");

        active.set(columns.created_at, existing.get(columns.created_at));
        active.set(columns.created_by, existing.get(columns.created_by));
        active.set(columns.updated_at, Value::from(Some((self.clock)())));
        active.set(columns.updated_by, Value::from(principal));
    }
}
