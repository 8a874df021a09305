use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn, orm_from_pool},
};

/// Secrets for issuing and verifying bearer tokens.
#[derive(Clone)]
pub struct AuthKeys {
    pub jwt_secret: Arc<str>,
    pub token_ttl_hours: i64,
}

impl AuthKeys {
    pub fn new(jwt_secret: impl Into<Arc<str>>, token_ttl_hours: i64) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_hours,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub auth: AuthKeys,
}

impl AppState {
    pub fn new(pool: DbPool, auth: AuthKeys) -> Self {
        let orm = orm_from_pool(&pool);
        Self { pool, orm, auth }
    }

    pub fn from_config(pool: DbPool, config: &AppConfig) -> Self {
        Self::new(
            pool,
            AuthKeys::new(config.jwt_secret.as_str(), config.token_ttl_hours),
        )
    }
}
