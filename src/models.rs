use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Transfer object exposed by a [`CrudService`](crate::CrudService).
///
/// The id is optional: it is absent on a DTO about to be created and on probes that do not
/// filter by id.
pub trait BaseDto: Send + Sync + 'static {
    type Id;

    fn id(&self) -> Option<Self::Id>;

    fn set_id(&mut self, id: Option<Self::Id>);
}

/// Audit fields of an auditable DTO. Flatten it into the DTO:
///
/// ```rust,ignore
/// #[derive(Serialize, Deserialize)]
/// pub struct CustomerDto {
///     pub id: Option<i32>,
///     pub name: Option<String>,
///     #[serde(flatten)]
///     pub audit: AuditFields,
/// }
/// ```
///
/// These are read-only from the client's point of view: the service stamps them on every
/// write and ignores whatever the client sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuditFields {
    #[schema(example = "2025-01-18")]
    pub created_at: Option<NaiveDate>,
    pub updated_at: Option<NaiveDate>,
    #[schema(example = "admin")]
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}
