use crudbase::{BaseDto, CrudEntity, Mapper, SearchField, Validatable};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plain code/description value entity without audit columns.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: String,
    pub description: String,
    pub deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl CrudEntity for Entity {
    type Id = i32;
    type ActiveModelType = ActiveModel;

    const RESOURCE_NAME_SINGULAR: &'static str = "Country";
    const RESOURCE_NAME_PLURAL: &'static str = "countries";
    const ID_COLUMN: Column = Column::Id;
    const DELETED_COLUMN: Column = Column::Deleted;

    fn search_fields() -> Vec<SearchField<Column>> {
        vec![
            SearchField::integer("id", Column::Id),
            SearchField::text("code", Column::Code),
            SearchField::text("description", Column::Description),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDto {
    pub id: Option<i32>,
    pub code: Option<String>,
    pub description: Option<String>,
}

impl CountryDto {
    pub fn new(code: &str, description: &str) -> Self {
        Self {
            id: None,
            code: Some(code.to_string()),
            description: Some(description.to_string()),
        }
    }
}

impl BaseDto for CountryDto {
    type Id = i32;

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: Option<i32>) {
        self.id = id;
    }
}

impl Validatable for CountryDto {}

#[derive(Debug, Clone, Copy, Default)]
pub struct CountryMapper;

impl Mapper<Entity, CountryDto> for CountryMapper {
    fn to_dto(&self, entity: Model) -> CountryDto {
        CountryDto {
            id: Some(entity.id),
            code: Some(entity.code),
            description: Some(entity.description),
        }
    }

    fn to_entity(&self, dto: CountryDto) -> Model {
        Model {
            id: dto.id.unwrap_or_default(),
            code: dto.code.unwrap_or_default(),
            description: dto.description.unwrap_or_default(),
            deleted: false,
        }
    }

    fn to_probe(&self, probe: &CountryDto) -> ActiveModel {
        ActiveModel {
            id: probe.id.map_or(NotSet, Set),
            code: probe.code.clone().map_or(NotSet, Set),
            description: probe.description.clone().map_or(NotSet, Set),
            deleted: NotSet,
        }
    }
}
