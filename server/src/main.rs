mod config;
mod handlers;
mod query_validation;
mod routes;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use config::Config;
use handlers::AppState;
use migration::{Migrator, MigratorTrait};
use query_validation::ListQueriesValidator;
use weather_api_services::{OpenWeatherApi, QueryService, create_connection};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();

    log::info!(
        "Starting Weather API server on {}:{}",
        config.server_host,
        config.server_port
    );

    let db = create_connection(&config.database_url())
        .await
        .expect("Failed to connect to database");
    log::info!("Database connection established");

    Migrator::up(&db, None)
        .await
        .expect("Failed to apply database migrations");
    log::info!("Database schema is up to date");

    let app_state = web::Data::new(AppState {
        query_service: QueryService::new(db),
        weather_api: OpenWeatherApi::new(config.open_weather_api_key.clone()),
        query_validator: ListQueriesValidator::new(20, 100),
    });

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_method()
            .allow_any_origin()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind(format!("{}:{}", config.server_host, config.server_port))?
    .run()
    .await
}
