use chrono::{DateTime, Utc};
use crudbase::{BaseDto, CrudEntity, Mapper, SearchField, Validatable};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sensor record covering the float, uuid and UTC timestamp field kinds.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub serial: Uuid,
    pub temperature: f64,
    pub installed_at: DateTimeUtc,
    pub deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl CrudEntity for Entity {
    type Id = i32;
    type ActiveModelType = ActiveModel;

    const RESOURCE_NAME_SINGULAR: &'static str = "Device";
    const RESOURCE_NAME_PLURAL: &'static str = "devices";
    const ID_COLUMN: Column = Column::Id;
    const DELETED_COLUMN: Column = Column::Deleted;

    fn search_fields() -> Vec<SearchField<Column>> {
        vec![
            SearchField::integer("id", Column::Id),
            SearchField::uuid("serial", Column::Serial),
            SearchField::float("temperature", Column::Temperature),
            SearchField::date_time_utc("installed_at", Column::InstalledAt),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceDto {
    pub id: Option<i32>,
    pub serial: Option<Uuid>,
    pub temperature: Option<f64>,
    pub installed_at: Option<DateTime<Utc>>,
}

impl DeviceDto {
    pub fn new(serial: Uuid, temperature: f64, installed_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            serial: Some(serial),
            temperature: Some(temperature),
            installed_at: Some(installed_at),
        }
    }
}

impl BaseDto for DeviceDto {
    type Id = i32;

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: Option<i32>) {
        self.id = id;
    }
}

impl Validatable for DeviceDto {}

#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceMapper;

impl Mapper<Entity, DeviceDto> for DeviceMapper {
    fn to_dto(&self, entity: Model) -> DeviceDto {
        DeviceDto {
            id: Some(entity.id),
            serial: Some(entity.serial),
            temperature: Some(entity.temperature),
            installed_at: Some(entity.installed_at),
        }
    }

    fn to_entity(&self, dto: DeviceDto) -> Model {
        Model {
            id: dto.id.unwrap_or_default(),
            serial: dto.serial.unwrap_or_default(),
            temperature: dto.temperature.unwrap_or_default(),
            installed_at: dto.installed_at.unwrap_or_default(),
            deleted: false,
        }
    }

    fn to_probe(&self, probe: &DeviceDto) -> ActiveModel {
        ActiveModel {
            id: probe.id.map_or(NotSet, Set),
            serial: probe.serial.map_or(NotSet, Set),
            temperature: probe.temperature.map_or(NotSet, Set),
            installed_at: probe.installed_at.map_or(NotSet, Set),
            deleted: NotSet,
        }
    }
}
