use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use dotenvy::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use biztime::{
    api::{self, middleware::request_id, ApiDoc},
    app_state::AppState,
    config::Config,
    database,
};

fn cors(config: &Config) -> Cors {
    let origins = config.cors_origins();
    if origins.is_empty() {
        return Cors::default();
    }

    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allow_any_header()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().expect("Failed to load configuration");
    let db = database::connect().await?;

    let host = config.host.clone();
    let port = config.port;
    let body_limit = config.effective_max_body_bytes();
    let state = web::Data::new(AppState::new(db, config));

    log::info!("Starting server at http://{}:{}", host, port);
    log::info!("Swagger UI available at http://{}:{}/swagger-ui/", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::from_fn(request_id))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .wrap(cors(&state.config))
            .app_data(state.clone())
            .configure(|cfg| api::configure_with_body_limit(cfg, body_limit))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .default_service(web::to(api::not_found))
    })
    .bind((host, port))?
    .run()
    .await
}
