use crate::entity::{cities, queries};
use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use weather_api_shared::{CityData, WeatherInfo, WeatherResponse};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

pub struct QueryService {
    db: DatabaseConnection,
}

impl QueryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Look up a cached city by the exact name string it was first queried
    /// under. No normalization: "Lisbon" and "lisbon" are distinct rows.
    pub async fn find_city_by_name(&self, name: &str) -> Result<Option<cities::Model>> {
        let city = cities::Entity::find()
            .filter(cities::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(city)
    }

    pub async fn create_city(&self, data: &CityData) -> Result<cities::Model> {
        let city = cities::ActiveModel {
            name: Set(data.name.clone()),
            country: Set(data.country.clone()),
            lat: Set(data.lat),
            lon: Set(data.lon),
            utc_timestamp: Set(epoch_now()),
            ..Default::default()
        };

        Ok(city.insert(&self.db).await?)
    }

    pub async fn create_query(
        &self,
        city_id: i32,
        observation: &WeatherInfo,
    ) -> Result<queries::Model> {
        let query = queries::ActiveModel {
            city_id: Set(city_id),
            weather_name: Set(observation.weather_name.clone()),
            weather_description: Set(observation.weather_description.clone()),
            weather_icon: Set(observation.weather_icon.clone()),
            temp: Set(observation.temp),
            pressure: Set(observation.pressure),
            humidity: Set(observation.humidity),
            visibility: Set(observation.visibility),
            wind_speed: Set(observation.wind_speed),
            wind_deg: Set(observation.wind_degree),
            wind_direction: Set(observation.wind_direction.clone()),
            wind_code: Set(observation.wind_code.clone()),
            cloudiness: Set(observation.cloudiness),
            sunrise: Set(observation.sunrise),
            sunset: Set(observation.sunset),
            utc_timestamp: Set(epoch_now()),
            ..Default::default()
        };

        Ok(query.insert(&self.db).await?)
    }

    /// Get one stored weather query joined with its owning city.
    pub async fn get_query(&self, id: i32) -> Result<Option<WeatherResponse>> {
        let row = queries::Entity::find_by_id(id)
            .find_also_related(cities::Entity)
            .one(&self.db)
            .await?;

        Ok(row.and_then(|(query, city)| city.map(|city| to_weather_response(&query, &city))))
    }

    /// Page through stored weather queries ordered by id. `offset` is a page
    /// index: the number of rows skipped is `limit * offset`.
    pub async fn list_queries(
        &self,
        limit: u64,
        offset: u64,
        descending: bool,
    ) -> Result<Vec<WeatherResponse>> {
        let order = if descending { Order::Desc } else { Order::Asc };

        let rows = queries::Entity::find()
            .order_by(queries::Column::Id, order)
            .limit(limit)
            .offset(limit * offset)
            .find_also_related(cities::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(query, city)| city.map(|city| to_weather_response(&query, &city)))
            .collect())
    }
}

// Fractional UTC epoch seconds, the stored timestamp format.
fn epoch_now() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Assemble the public response from a query row and its owning city: all
/// query fields are copied, the location fields come from the city, and the
/// bare icon code becomes a full image URL.
fn to_weather_response(query: &queries::Model, city: &cities::Model) -> WeatherResponse {
    WeatherResponse {
        id: query.id,
        city_name: city.name.clone(),
        city_country: city.country.clone(),
        latitude: city.lat,
        longitude: city.lon,
        weather_name: query.weather_name.clone(),
        weather_description: query.weather_description.clone(),
        weather_icon: format!("{}/{}@2x.png", ICON_BASE_URL, query.weather_icon),
        temp: query.temp,
        pressure: query.pressure,
        humidity: query.humidity,
        visibility: query.visibility,
        wind_speed: query.wind_speed,
        wind_degree: query.wind_deg,
        wind_direction: query.wind_direction.clone(),
        wind_code: query.wind_code.clone(),
        cloudiness: query.cloudiness,
        sunrise: query.sunrise,
        sunset: query.sunset,
        utc_timestamp: query.utc_timestamp,
    }
}
