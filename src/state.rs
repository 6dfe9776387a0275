use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn, orm_from_pool},
    llm::LlmProvider,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub llm: Arc<dyn LlmProvider>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, llm: Arc<dyn LlmProvider>, config: AppConfig) -> Self {
        let orm = orm_from_pool(pool.clone());
        Self {
            pool,
            orm,
            llm,
            config: Arc::new(config),
        }
    }
}
