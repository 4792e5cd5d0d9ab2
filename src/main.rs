use std::env;

use actix_web::{App, HttpServer, middleware, web};
use config::Config;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use dotenvy::dotenv;

use product_catalog::db::establish_connection_pool;
use product_catalog::models::config::ServerConfig;
use product_catalog::repository::DieselRepository;
use product_catalog::routes::{self, CatalogService};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = match load_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    match pool.get() {
        Ok(mut conn) => {
            if let Err(e) = conn.run_pending_migrations(MIGRATIONS) {
                log::error!("Failed to run database migrations: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            log::error!("Failed to get database connection for migrations: {e}");
            std::process::exit(1);
        }
    }

    let service = web::Data::new(CatalogService::new(DieselRepository::new(pool)));
    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Starting product catalog on {}:{} (CORS origin {})",
        bind_address.0,
        bind_address.1,
        server_config.cors_allowed_origin
    );

    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors(&server_config.cors_allowed_origin))
            .wrap(middleware::Logger::default())
            .app_data(service.clone())
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
