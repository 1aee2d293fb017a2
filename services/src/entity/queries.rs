use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "queries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub city_id: i32,
    pub weather_name: String,
    pub weather_description: String,
    pub weather_icon: String,
    #[sea_orm(column_type = "Double")]
    pub temp: f64,
    #[sea_orm(column_type = "Double")]
    pub pressure: f64,
    #[sea_orm(column_type = "Double")]
    pub humidity: f64,
    #[sea_orm(column_type = "Double")]
    pub visibility: f64,
    #[sea_orm(column_type = "Double")]
    pub wind_speed: f64,
    pub wind_deg: i32,
    pub wind_direction: String,
    pub wind_code: String,
    #[sea_orm(column_type = "Double")]
    pub cloudiness: f64,
    #[sea_orm(column_type = "BigInteger")]
    pub sunrise: i64,
    #[sea_orm(column_type = "BigInteger")]
    pub sunset: i64,
    #[sea_orm(column_type = "Double")]
    pub utc_timestamp: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cities::Entity",
        from = "Column::CityId",
        to = "super::cities::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Cities,
}

impl Related<super::cities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
