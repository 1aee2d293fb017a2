pub mod models;

pub use models::{CityData, ErrorResponse, WeatherInfo, WeatherResponse};
