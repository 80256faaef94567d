use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use summary_quiz_server::{
    app_state::AppState,
    auth::JwtService,
    config::Config,
    handlers::{configure_quiz_routes, health_check, health_check_ready},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    let jwt_service = web::Data::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_expiration_hours,
    ));

    let state = AppState::new(&config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let state = web::Data::new(state);

    log::info!(
        "Starting HTTP server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(jwt_service.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(health_check)
            .service(health_check_ready)
            .configure(configure_quiz_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}
