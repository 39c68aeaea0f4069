use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use taskdesk::config::Config;
use taskdesk::routes::{self, health};
use taskdesk::store::{MemoryStore, PgStore, Store, UnconfiguredStore};
use taskdesk::AppState;

const MEMORY_URL: &str = "memory://";

/// Chooses the backing store without touching the network. Database problems are
/// logged, never fatal. The Postgres store is also returned on its own so its schema
/// can be prepared once the port is bound.
fn open_store(config: &Config) -> (Arc<dyn Store>, Option<PgStore>) {
    let Some(url) = config.database_url.as_deref() else {
        log::error!("DATABASE_URL is missing; every data request will fail until it is set");
        return (Arc::new(UnconfiguredStore), None);
    };

    if url == MEMORY_URL {
        log::warn!("using the in-memory store; data is lost on restart");
        return (Arc::new(MemoryStore::new()), None);
    }

    match PgStore::connect_lazy(url, config.database_max_connections) {
        Ok(store) => (Arc::new(store.clone()), Some(store)),
        Err(e) => {
            log::error!("invalid DATABASE_URL: {}", e);
            (Arc::new(UnconfiguredStore), None)
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    let (store, pg_store) = open_store(&config);
    let state = web::Data::new(AppState::new(store, config.bcrypt_cost));

    log::info!("starting task board backend at {}", config.server_url());
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(routes::cors())
            .wrap(Logger::default())
            .service(health::index)
            .service(health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run();

    if let Some(pg_store) = pg_store {
        // Requests retry the migrations themselves if this attempt fails.
        actix_web::rt::spawn(async move {
            match pg_store.ensure_schema().await {
                Ok(()) => log::info!("connected to database and applied migrations"),
                Err(e) => log::error!("database connection error: {}", e),
            }
        });
    }

    server.await
}
