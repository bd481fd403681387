mod auth;
mod scrape;

pub use auth::AuthService;
pub use scrape::ScrapeService;

use std::sync::Arc;

use crate::types::Dependencies;

#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub scrape: ScrapeService,
}

impl Services {
    pub fn new(deps: Arc<Dependencies>) -> Self {
        Self {
            auth: AuthService::new(deps.clone()),
            scrape: ScrapeService::new(deps),
        }
    }
}
