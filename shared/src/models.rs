use serde::{Deserialize, Serialize};

/// A city geolocation resolved through the geocoding endpoint. `name` is the
/// string the caller asked for, not the name the provider returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityData {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// One current-weather observation as extracted from the provider payload.
/// `weather_icon` is the bare icon code; the full image URL is only built
/// when a response is assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherInfo {
    pub weather_name: String,
    pub weather_description: String,
    pub weather_icon: String,
    pub temp: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub visibility: f64,
    pub wind_speed: f64,
    pub wind_degree: i32,
    pub wind_direction: String,
    pub wind_code: String,
    pub cloudiness: f64,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Public response shape shared by all weather endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub id: i32,
    pub city_name: String,
    pub city_country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub weather_name: String,
    pub weather_description: String,
    pub weather_icon: String,
    pub temp: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub visibility: f64,
    pub wind_speed: f64,
    pub wind_degree: i32,
    pub wind_direction: String,
    pub wind_code: String,
    pub cloudiness: f64,
    pub sunrise: i64,
    pub sunset: i64,
    pub utc_timestamp: f64,
}

/// Error payload returned with 400 and 500 responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
