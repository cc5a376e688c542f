use chrono::{NaiveDate, NaiveDateTime};
use crudbase::validation::validators;
use crudbase::{
    AuditColumns, AuditFields, BaseDto, CrudEntity, Mapper, SearchField, Validatable,
    ValidationErrors, ValidationGroup,
};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveValue, Value};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub vip: bool,
    pub joined_on: Option<Date>,
    pub last_login: Option<DateTime>,
    pub deleted: bool,
    pub created_at: Option<Date>,
    pub updated_at: Option<Date>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl CrudEntity for Entity {
    type Id = i32;
    type ActiveModelType = ActiveModel;

    const RESOURCE_NAME_SINGULAR: &'static str = "Customer";
    const RESOURCE_NAME_PLURAL: &'static str = "customers";
    const ID_COLUMN: Column = Column::Id;
    const DELETED_COLUMN: Column = Column::Deleted;
    const AUDIT_COLUMNS: Option<AuditColumns<Column>> = Some(AuditColumns {
        created_at: Column::CreatedAt,
        updated_at: Column::UpdatedAt,
        created_by: Column::CreatedBy,
        updated_by: Column::UpdatedBy,
    });

    fn search_fields() -> Vec<SearchField<Column>> {
        vec![
            SearchField::integer("id", Column::Id),
            SearchField::text("name", Column::Name),
            SearchField::text("email", Column::Email),
            SearchField::integer("age", Column::Age),
            SearchField::boolean("vip", Column::Vip),
            SearchField::date("joined_on", Column::JoinedOn),
            SearchField::date_time("last_login", Column::LastLogin),
            SearchField::date("created_at", Column::CreatedAt),
            SearchField::text("created_by", Column::CreatedBy),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDto {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub vip: Option<bool>,
    pub joined_on: Option<NaiveDate>,
    pub last_login: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl CustomerDto {
    pub fn new(name: &str, email: &str, age: i32) -> Self {
        Self {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            age: Some(age),
            vip: Some(false),
            ..Self::default()
        }
    }

    pub fn probe() -> Self {
        Self::default()
    }
}

impl BaseDto for CustomerDto {
    type Id = i32;

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: Option<i32>) {
        self.id = id;
    }
}

impl Validatable for CustomerDto {
    fn validate(&self, _group: ValidationGroup) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = self.name.as_deref().unwrap_or_default();
        errors.check(validators::not_empty("name", name));
        errors.check(validators::max_chars("name", name, 64));
        errors.check(validators::not_empty(
            "email",
            self.email.as_deref().unwrap_or_default(),
        ));
        if let Some(age) = self.age {
            errors.check(validators::min_max_value("age", age, 0, 150));
        }
        errors.result()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerMapper;

fn set_if<T: Into<Value>>(value: Option<T>) -> ActiveValue<T> {
    value.map_or(NotSet, Set)
}

fn set_some_if<T>(value: Option<T>) -> ActiveValue<Option<T>>
where
    Option<T>: Into<Value>,
{
    value.map_or(NotSet, |v| Set(Some(v)))
}

impl Mapper<Entity, CustomerDto> for CustomerMapper {
    fn to_dto(&self, entity: Model) -> CustomerDto {
        CustomerDto {
            id: Some(entity.id),
            name: Some(entity.name),
            email: Some(entity.email),
            age: Some(entity.age),
            vip: Some(entity.vip),
            joined_on: entity.joined_on,
            last_login: entity.last_login,
            audit: AuditFields {
                created_at: entity.created_at,
                updated_at: entity.updated_at,
                created_by: entity.created_by,
                updated_by: entity.updated_by,
            },
        }
    }

    fn to_entity(&self, dto: CustomerDto) -> Model {
        Model {
            id: dto.id.unwrap_or_default(),
            name: dto.name.unwrap_or_default(),
            email: dto.email.unwrap_or_default(),
            age: dto.age.unwrap_or_default(),
            vip: dto.vip.unwrap_or_default(),
            joined_on: dto.joined_on,
            last_login: dto.last_login,
            deleted: false,
            created_at: dto.audit.created_at,
            updated_at: dto.audit.updated_at,
            created_by: dto.audit.created_by,
            updated_by: dto.audit.updated_by,
        }
    }

    fn to_probe(&self, probe: &CustomerDto) -> ActiveModel {
        ActiveModel {
            id: set_if(probe.id),
            name: set_if(probe.name.clone()),
            email: set_if(probe.email.clone()),
            age: set_if(probe.age),
            vip: set_if(probe.vip),
            joined_on: set_some_if(probe.joined_on),
            last_login: set_some_if(probe.last_login),
            deleted: NotSet,
            created_at: set_some_if(probe.audit.created_at),
            updated_at: set_some_if(probe.audit.updated_at),
            created_by: set_some_if(probe.audit.created_by.clone()),
            updated_by: set_some_if(probe.audit.updated_by.clone()),
        }
    }
}
