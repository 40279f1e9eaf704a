use crate::config::Config;
use sea_orm::DatabaseConnection;

/// State shared by all workers through one `web::Data`. Handlers get the pool and the config from here.
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self { db, config }
    }
}
