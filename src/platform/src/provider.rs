use std::sync::Arc;

use common::config::Config;
use metadata::MetadataProvider;

use crate::auth::Auth;
use crate::events::Events;

pub struct PlatformProvider {
    pub events: Arc<Events>,
    pub auth: Arc<Auth>,
}

impl PlatformProvider {
    pub fn new(md: Arc<MetadataProvider>, cfg: &Config) -> Self {
        PlatformProvider {
            events: Arc::new(Events::new(md.events.clone())),
            auth: Arc::new(Auth::new(md.accounts.clone(), cfg.into())),
        }
    }
}
