use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_cities::Cities;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Queries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Queries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Queries::CityId).integer().not_null())
                    .col(ColumnDef::new(Queries::WeatherName).string().not_null())
                    .col(
                        ColumnDef::new(Queries::WeatherDescription)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Queries::WeatherIcon).string().not_null())
                    .col(ColumnDef::new(Queries::Temp).double().not_null())
                    .col(ColumnDef::new(Queries::Pressure).double().not_null())
                    .col(ColumnDef::new(Queries::Humidity).double().not_null())
                    .col(ColumnDef::new(Queries::Visibility).double().not_null())
                    .col(ColumnDef::new(Queries::WindSpeed).double().not_null())
                    .col(ColumnDef::new(Queries::WindDeg).integer().not_null())
                    .col(ColumnDef::new(Queries::WindDirection).string().not_null())
                    .col(ColumnDef::new(Queries::WindCode).string().not_null())
                    .col(ColumnDef::new(Queries::Cloudiness).double().not_null())
                    .col(ColumnDef::new(Queries::Sunrise).big_integer().not_null())
                    .col(ColumnDef::new(Queries::Sunset).big_integer().not_null())
                    .col(ColumnDef::new(Queries::UtcTimestamp).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_queries_city_id")
                            .from(Queries::Table, Queries::CityId)
                            .to(Cities::Table, Cities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_queries_city_id")
                    .table(Queries::Table)
                    .col(Queries::CityId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Queries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Queries {
    Table,
    Id,
    CityId,
    WeatherName,
    WeatherDescription,
    WeatherIcon,
    Temp,
    Pressure,
    Humidity,
    Visibility,
    WindSpeed,
    WindDeg,
    WindDirection,
    WindCode,
    Cloudiness,
    Sunrise,
    Sunset,
    UtcTimestamp,
}
