use crate::query_validation::ListQueriesValidator;
use actix_web::{HttpResponse, Responder, web};
use std::collections::HashMap;
use weather_api_services::{OpenWeatherApi, QueryService, WeatherApiError};
use weather_api_shared::ErrorResponse;

pub struct AppState {
    pub query_service: QueryService,
    pub weather_api: OpenWeatherApi,
    pub query_validator: ListQueriesValidator,
}

/// Look up current weather for a city: resolve-or-create the city row,
/// fetch the observation, persist it, and return the stored record.
pub async fn get_weather(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let city_name = path.into_inner();

    let city = match state.query_service.find_city_by_name(&city_name).await {
        Ok(Some(city)) => city,
        Ok(None) => {
            let geo = match state.weather_api.get_geo_data(&city_name).await {
                Ok(geo) => geo,
                Err(e) => return provider_error_response(&city_name, &e),
            };
            match state.query_service.create_city(&geo).await {
                Ok(city) => city,
                Err(e) => {
                    log::error!("Failed to store city '{}': {}", city_name, e);
                    return internal_error(e.to_string());
                }
            }
        }
        Err(e) => {
            log::error!("Failed to look up city '{}': {}", city_name, e);
            return internal_error(e.to_string());
        }
    };

    // A city row created above is kept even when the weather fetch fails.
    let observation = match state.weather_api.get_weather_data(city.lat, city.lon).await {
        Ok(observation) => observation,
        Err(e) => return provider_error_response(&city_name, &e),
    };

    let query = match state.query_service.create_query(city.id, &observation).await {
        Ok(query) => query,
        Err(e) => {
            log::error!("Failed to store weather query for '{}': {}", city_name, e);
            return internal_error(e.to_string());
        }
    };

    // Read the stored row back so the response reflects exactly what was
    // persisted.
    match state.query_service.get_query(query.id).await {
        Ok(Some(response)) => HttpResponse::Ok().json(response),
        Ok(None) => {
            log::error!("Weather query {} could not be read back", query.id);
            internal_error("Stored weather query could not be read back".to_string())
        }
        Err(e) => {
            log::error!("Failed to read back weather query {}: {}", query.id, e);
            internal_error(e.to_string())
        }
    }
}

/// Get one stored weather query by id.
pub async fn get_query(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    let query_id = path.into_inner();

    match state.query_service.get_query(query_id).await {
        Ok(Some(response)) => HttpResponse::Ok().json(response),
        Ok(None) => bad_request("No weather query with this ID".to_string()),
        Err(e) => {
            log::error!("Failed to read weather query {}: {}", query_id, e);
            internal_error(e.to_string())
        }
    }
}

/// Page through stored weather queries ordered by id.
pub async fn get_queries(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let params = match state.query_validator.validate(&query) {
        Ok(params) => params,
        Err(e) => {
            log::error!("Rejected weather query listing: {}", e);
            return bad_request(e.to_string());
        }
    };

    match state
        .query_service
        .list_queries(params.limit, params.offset, params.descending)
        .await
    {
        Ok(responses) if responses.is_empty() => bad_request("End of weather queries".to_string()),
        Ok(responses) => HttpResponse::Ok().json(responses),
        Err(e) => {
            log::error!("Failed to list weather queries: {}", e);
            internal_error(e.to_string())
        }
    }
}

fn provider_error_response(city_name: &str, error: &WeatherApiError) -> HttpResponse {
    log::error!("Weather provider error for '{}': {}", city_name, error);
    if error.is_client_error() {
        bad_request(error.to_string())
    } else {
        internal_error(error.to_string())
    }
}

fn bad_request(error: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse { error })
}

fn internal_error(error: String) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse { error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use weather_api_services::{cities, queries};
    use weather_api_shared::WeatherResponse;

    fn test_state(db: DatabaseConnection) -> web::Data<AppState> {
        web::Data::new(AppState {
            query_service: QueryService::new(db),
            weather_api: OpenWeatherApi::new("test-key".to_string()),
            query_validator: ListQueriesValidator::new(20, 100),
        })
    }

    fn city_fixture() -> cities::Model {
        cities::Model {
            id: 1,
            name: "Lisbon".to_string(),
            country: "PT".to_string(),
            lat: 38.7078,
            lon: -9.1366,
            utc_timestamp: 1_700_000_000.5,
        }
    }

    fn query_fixture(id: i32) -> queries::Model {
        queries::Model {
            id,
            city_id: 1,
            weather_name: "Clouds".to_string(),
            weather_description: "scattered clouds".to_string(),
            weather_icon: "03d".to_string(),
            temp: 17.2,
            pressure: 1018.0,
            humidity: 67.0,
            visibility: 10000.0,
            wind_speed: 4.6,
            wind_deg: 320,
            wind_direction: "Northwest".to_string(),
            wind_code: "NW".to_string(),
            cloudiness: 40.0,
            sunrise: 1_700_027_000,
            sunset: 1_700_063_000,
            utc_timestamp: 1_700_050_000.25,
        }
    }

    async fn call(
        db: DatabaseConnection,
        uri: &str,
    ) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(test_state(db))
                .configure(routes::configure),
        )
        .await;
        let req = test::TestRequest::get().uri(uri).to_request();
        test::call_service(&app, req).await
    }

    #[actix_rt::test]
    async fn get_query_returns_stored_fields_with_icon_url() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![(query_fixture(7), city_fixture())]])
            .into_connection();

        let resp = call(db, "/api/v1/queries/7").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: WeatherResponse = test::read_body_json(resp).await;
        assert_eq!(body.id, 7);
        assert_eq!(body.city_name, "Lisbon");
        assert_eq!(body.city_country, "PT");
        assert_eq!(
            body.weather_icon,
            "https://openweathermap.org/img/wn/03d@2x.png"
        );
        assert_eq!(body.wind_direction, "Northwest");
        assert_eq!(body.utc_timestamp, 1_700_050_000.25);
    }

    #[actix_rt::test]
    async fn get_query_unknown_id_is_a_bad_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<(queries::Model, cities::Model)>::new()])
            .into_connection();

        let resp = call(db, "/api/v1/queries/99").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "No weather query with this ID");
    }

    #[actix_rt::test]
    async fn list_rejects_unknown_parameter_before_storage() {
        // No results queued: reaching the database would fail the call.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let resp = call(db, "/api/v1/queries?limit=20&color=blue").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.error.contains("color"));
    }

    #[actix_rt::test]
    async fn list_rejects_out_of_bounds_limit_before_storage() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let resp = call(db, "/api/v1/queries?limit=101").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let resp = call(db, "/api/v1/queries?limit=0").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn list_empty_page_is_a_bad_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<(queries::Model, cities::Model)>::new()])
            .into_connection();

        let resp = call(db, "/api/v1/queries?offset=5").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "End of weather queries");
    }

    #[actix_rt::test]
    async fn list_returns_every_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                (query_fixture(1), city_fixture()),
                (query_fixture(2), city_fixture()),
            ]])
            .into_connection();

        let resp = call(db, "/api/v1/queries").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Vec<WeatherResponse> = test::read_body_json(resp).await;
        let ids: Vec<i32> = body.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[actix_rt::test]
    async fn latest_and_bare_prefixes_mirror_the_versioned_routes() {
        for prefix in ["/api/latest", "/api"] {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![(query_fixture(7), city_fixture())]])
                .into_connection();

            let resp = call(db, &format!("{}/queries/7", prefix)).await;
            assert_eq!(resp.status(), StatusCode::OK, "prefix {prefix}");
        }
    }
}
