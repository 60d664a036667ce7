use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer, web};
use tracing::warn;

use blogpost_api::application::post_service::PostService;
use blogpost_api::data::memory::InMemoryPostRepository;
use blogpost_api::data::post_repository::{PostRepository, PostgresPostRepository};
use blogpost_api::infrastructure::config::AppConfig;
use blogpost_api::infrastructure::database::{create_pool, run_migrations};
use blogpost_api::infrastructure::logging::init_logging;
use blogpost_api::presentation::handlers;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;

    let repo: Arc<dyn PostRepository> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            Arc::new(PostgresPostRepository::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(InMemoryPostRepository::new())
        }
    };

    let post_service = PostService::new(repo);
    let config_data = config.clone();

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(Logger::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .wrap(cors)
            .app_data(web::Data::new(post_service.clone()))
            .configure(handlers::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
        .max_age(3600);

    if config.cors_origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    for origin in &config.cors_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
