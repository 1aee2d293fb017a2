use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use weather_api_shared::{CityData, WeatherInfo};

const GEO_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
const DATA_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Errors surfaced by the OpenWeatherMap client. `CityNotFound` and
/// `Provider` carry text meant for the caller; the remaining variants are
/// internal failures.
#[derive(Debug, Error)]
pub enum WeatherApiError {
    #[error("No such city")]
    CityNotFound,
    #[error("{0}")]
    Provider(String),
    #[error("weather provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("weather provider returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("weather provider payload is missing {0}")]
    Malformed(&'static str),
}

impl WeatherApiError {
    /// True when the error describes the caller's request rather than a
    /// server-side fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::CityNotFound | Self::Provider(_))
    }
}

/// Client for the OpenWeatherMap geocoding and current-weather endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherApi {
    api_key: String,
    http: Client,
}

impl OpenWeatherApi {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    /// Resolve a free-text city name to its country and coordinates. The
    /// first candidate wins; the returned record keeps the caller-supplied
    /// name, not the one the provider reports.
    pub async fn get_geo_data(&self, city: &str) -> Result<CityData, WeatherApiError> {
        log::debug!("Resolving city '{}' via geocoding", city);

        let body = self
            .http
            .get(GEO_URL)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("limit", "1")])
            .send()
            .await?
            .text()
            .await?;

        parse_geo_response(&body, city)
    }

    /// Fetch the current weather at a coordinate pair. Units are fixed to
    /// metric and language to English.
    pub async fn get_weather_data(&self, lat: f64, lon: f64) -> Result<WeatherInfo, WeatherApiError> {
        log::debug!("Fetching current weather for ({}, {})", lat, lon);

        let body = self
            .http
            .get(DATA_URL)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
                ("lang", "en".to_string()),
            ])
            .send()
            .await?
            .text()
            .await?;

        parse_weather_response(&body)
    }
}

/// Convert wind degrees to a compass direction name and 1-2 letter code.
/// Sectors are 45 degrees wide with boundaries at odd multiples of 22.5; a
/// value exactly on a boundary belongs to the higher sector, and the North
/// sector wraps across 0.
pub fn wind_direction(degrees: f64) -> (&'static str, &'static str) {
    let degrees = degrees.rem_euclid(360.0);

    if (22.5..67.5).contains(&degrees) {
        ("Northeast", "NE")
    } else if (67.5..112.5).contains(&degrees) {
        ("East", "E")
    } else if (112.5..157.5).contains(&degrees) {
        ("Southeast", "SE")
    } else if (157.5..202.5).contains(&degrees) {
        ("South", "S")
    } else if (202.5..247.5).contains(&degrees) {
        ("Southwest", "SW")
    } else if (247.5..292.5).contains(&degrees) {
        ("West", "W")
    } else if (292.5..337.5).contains(&degrees) {
        ("Northwest", "NW")
    } else {
        ("North", "N")
    }
}

#[derive(Debug, Deserialize)]
struct GeoCandidate {
    country: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct WindReadings {
    speed: f64,
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct CloudsReadings {
    all: f64,
}

#[derive(Debug, Deserialize)]
struct SysReadings {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherPayload {
    weather: Vec<WeatherCondition>,
    main: MainReadings,
    visibility: f64,
    wind: WindReadings,
    clouds: CloudsReadings,
    sys: SysReadings,
}

fn parse_geo_response(body: &str, requested_name: &str) -> Result<CityData, WeatherApiError> {
    let value: Value = serde_json::from_str(body)?;

    // A successful lookup is an array of candidates; anything else is the
    // provider's error object.
    let candidates = match value {
        Value::Array(candidates) => candidates,
        other => return Err(WeatherApiError::Provider(provider_message(&other))),
    };

    let first = candidates
        .into_iter()
        .next()
        .ok_or(WeatherApiError::CityNotFound)?;
    let candidate: GeoCandidate = serde_json::from_value(first)?;

    Ok(CityData {
        name: requested_name.to_string(),
        country: candidate.country,
        lat: candidate.lat,
        lon: candidate.lon,
    })
}

fn parse_weather_response(body: &str) -> Result<WeatherInfo, WeatherApiError> {
    let value: Value = serde_json::from_str(body)?;

    if !is_success_code(value.get("cod")) {
        return Err(WeatherApiError::Provider(provider_message(&value)));
    }

    let payload: CurrentWeatherPayload = serde_json::from_value(value)?;
    let condition = payload
        .weather
        .into_iter()
        .next()
        .ok_or(WeatherApiError::Malformed("a weather condition"))?;
    let (direction, code) = wind_direction(payload.wind.deg);

    Ok(WeatherInfo {
        weather_name: condition.main,
        weather_description: condition.description,
        weather_icon: condition.icon,
        temp: payload.main.temp,
        pressure: payload.main.pressure,
        humidity: payload.main.humidity,
        visibility: payload.visibility,
        wind_speed: payload.wind.speed,
        wind_degree: payload.wind.deg as i32,
        wind_direction: direction.to_string(),
        wind_code: code.to_string(),
        cloudiness: payload.clouds.all,
        sunrise: payload.sys.sunrise,
        sunset: payload.sys.sunset,
    })
}

// The provider reports `cod` as a number on success and, depending on the
// endpoint, as a number or string on failure.
fn is_success_code(cod: Option<&Value>) -> bool {
    match cod {
        Some(Value::Number(n)) => n.as_i64() == Some(200),
        Some(Value::String(s)) => s == "200",
        _ => false,
    }
}

fn provider_message(value: &Value) -> String {
    match value.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_stable_under_modulo() {
        for degrees in [-720.0, -450.0, -45.0, 10.0, 100.0, 360.0, 382.5, 725.0] {
            assert_eq!(
                wind_direction(degrees),
                wind_direction(degrees.rem_euclid(360.0))
            );
        }
    }

    #[test]
    fn direction_boundaries_go_to_the_higher_sector() {
        assert_eq!(wind_direction(0.0), ("North", "N"));
        assert_eq!(wind_direction(22.4), ("North", "N"));
        assert_eq!(wind_direction(22.5), ("Northeast", "NE"));
        assert_eq!(wind_direction(67.5), ("East", "E"));
        assert_eq!(wind_direction(112.5), ("Southeast", "SE"));
        assert_eq!(wind_direction(157.5), ("South", "S"));
        assert_eq!(wind_direction(202.5), ("Southwest", "SW"));
        assert_eq!(wind_direction(247.5), ("West", "W"));
        assert_eq!(wind_direction(292.5), ("Northwest", "NW"));
        assert_eq!(wind_direction(337.4), ("Northwest", "NW"));
        assert_eq!(wind_direction(337.5), ("North", "N"));
        assert_eq!(wind_direction(359.9), ("North", "N"));
    }

    #[test]
    fn direction_handles_negative_degrees() {
        // -45 wraps to 315, -22.5 to 337.5
        assert_eq!(wind_direction(-45.0), ("Northwest", "NW"));
        assert_eq!(wind_direction(-22.5), ("North", "N"));
    }

    #[test]
    fn geo_empty_result_is_city_not_found() {
        let err = parse_geo_response("[]", "Atlantis").unwrap_err();
        assert!(matches!(err, WeatherApiError::CityNotFound));
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "No such city");
    }

    #[test]
    fn geo_error_object_surfaces_provider_message() {
        let body = r#"{"cod": 401, "message": "Invalid API key"}"#;
        let err = parse_geo_response(body, "Lisbon").unwrap_err();
        assert!(matches!(err, WeatherApiError::Provider(_)));
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Invalid API key");
    }

    #[test]
    fn geo_keeps_the_requested_name() {
        let body = r#"[
            {"name": "Lisboa", "country": "PT", "lat": 38.7078, "lon": -9.1366},
            {"name": "Lisbon Falls", "country": "US", "lat": 44.0, "lon": -70.06}
        ]"#;
        let city = parse_geo_response(body, "lisbon").unwrap();
        assert_eq!(city.name, "lisbon");
        assert_eq!(city.country, "PT");
        assert_eq!(city.lat, 38.7078);
        assert_eq!(city.lon, -9.1366);
    }

    #[test]
    fn geo_malformed_body_is_not_a_client_error() {
        let err = parse_geo_response("not json", "Lisbon").unwrap_err();
        assert!(matches!(err, WeatherApiError::Decode(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn weather_non_success_code_surfaces_provider_message() {
        let body = r#"{"cod": "404", "message": "city not found"}"#;
        let err = parse_weather_response(body).unwrap_err();
        assert!(matches!(err, WeatherApiError::Provider(_)));
        assert_eq!(err.to_string(), "city not found");
    }

    #[test]
    fn weather_payload_is_extracted_with_derived_direction() {
        let body = r#"{
            "cod": 200,
            "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
            "main": {"temp": 17.2, "feels_like": 16.8, "pressure": 1018, "humidity": 67},
            "visibility": 10000,
            "wind": {"speed": 4.6, "deg": 320},
            "clouds": {"all": 40},
            "sys": {"country": "PT", "sunrise": 1700027000, "sunset": 1700063000}
        }"#;
        let info = parse_weather_response(body).unwrap();
        assert_eq!(info.weather_name, "Clouds");
        assert_eq!(info.weather_description, "scattered clouds");
        assert_eq!(info.weather_icon, "03d");
        assert_eq!(info.temp, 17.2);
        assert_eq!(info.pressure, 1018.0);
        assert_eq!(info.humidity, 67.0);
        assert_eq!(info.visibility, 10000.0);
        assert_eq!(info.wind_speed, 4.6);
        assert_eq!(info.wind_degree, 320);
        assert_eq!(info.wind_direction, "Northwest");
        assert_eq!(info.wind_code, "NW");
        assert_eq!(info.cloudiness, 40.0);
        assert_eq!(info.sunrise, 1_700_027_000);
        assert_eq!(info.sunset, 1_700_063_000);
    }

    #[test]
    fn weather_without_condition_list_is_malformed() {
        let body = r#"{
            "cod": 200,
            "weather": [],
            "main": {"temp": 17.2, "pressure": 1018, "humidity": 67},
            "visibility": 10000,
            "wind": {"speed": 4.6, "deg": 320},
            "clouds": {"all": 40},
            "sys": {"sunrise": 1700027000, "sunset": 1700063000}
        }"#;
        let err = parse_weather_response(body).unwrap_err();
        assert!(matches!(err, WeatherApiError::Malformed(_)));
        assert!(!err.is_client_error());
    }
}
