use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, EntityTrait, Iterable, ModelTrait, PrimaryKeyTrait,
    Value,
};
use std::fmt;

use crate::audit::AuditColumns;
use crate::filtering::SearchField;

/// Per-entity metadata the generic CRUD machinery needs.
///
/// Implemented on the sea-orm `Entity` of every table served through a
/// [`CrudService`](crate::CrudService). The entity must carry a boolean soft-delete column;
/// rows where it is `true` are invisible to every read.
///
/// ```rust,ignore
/// impl CrudEntity for customer::Entity {
///     type Id = i32;
///     type ActiveModelType = customer::ActiveModel;
///
///     const RESOURCE_NAME_SINGULAR: &'static str = "Customer";
///     const RESOURCE_NAME_PLURAL: &'static str = "customers";
///     const ID_COLUMN: customer::Column = customer::Column::Id;
///     const DELETED_COLUMN: customer::Column = customer::Column::Deleted;
///
///     fn search_fields() -> Vec<SearchField<customer::Column>> {
///         vec![
///             SearchField::integer("id", customer::Column::Id),
///             SearchField::text("name", customer::Column::Name),
///         ]
///     }
/// }
/// ```
pub trait CrudEntity: EntityTrait {
    /// Identifier type, convertible both to a bindable value and to the primary key.
    type Id: Clone
        + PartialEq
        + fmt::Debug
        + fmt::Display
        + Send
        + Sync
        + 'static
        + Into<Value>
        + Into<<Self::PrimaryKey as PrimaryKeyTrait>::ValueType>;

    type ActiveModelType: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + Send + Sync;

    const RESOURCE_NAME_SINGULAR: &'static str;
    const RESOURCE_NAME_PLURAL: &'static str;

    const ID_COLUMN: Self::Column;
    const DELETED_COLUMN: Self::Column;

    /// Audit columns stamped on insert and update. `None` for plain entities.
    const AUDIT_COLUMNS: Option<AuditColumns<Self::Column>> = None;

    /// Fields addressable by search criteria, probes and sort keys.
    fn search_fields() -> Vec<SearchField<Self::Column>>;

    /// Identity for a new record. `None` leaves the id to the database.
    #[must_use]
    fn generate_id() -> Option<Self::Id> {
        None
    }
}

/// Active model with every column of `model` set.
pub(crate) fn active_model_from<E: CrudEntity>(model: &E::Model) -> E::ActiveModelType {
    let mut active = <E::ActiveModelType as ActiveModelBehavior>::new();
    for column in E::Column::iter() {
        active.set(column, model.get(column));
    }
    active
}
