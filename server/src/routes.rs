use crate::handlers;
use actix_web::web;

/// The weather endpoints live under the versioned prefix and are mirrored at
/// the "latest" prefix and at the bare API prefix. The bare prefix is
/// registered last so the more specific scopes match first.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1").configure(weather_routes))
        .service(web::scope("/api/latest").configure(weather_routes))
        .service(web::scope("/api").configure(weather_routes));
}

fn weather_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/weather/{city_name}",
        web::get().to(handlers::get_weather),
    )
    .route("/queries", web::get().to(handlers::get_queries))
    .route(
        "/queries/{query_id}",
        web::get().to(handlers::get_query),
    );
}
