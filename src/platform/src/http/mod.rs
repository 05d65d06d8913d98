pub mod auth;
pub mod events;
pub mod index;

use std::sync::Arc;

use axum::middleware;
use axum::Extension;
use axum::Router;
use common::config::Config;
use common::http::print_request_response;
use metadata::MetadataProvider;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::PlatformProvider;

pub fn attach_routes(
    mut router: Router,
    md: &Arc<MetadataProvider>,
    platform: &Arc<PlatformProvider>,
    cfg: &Config,
) -> Router {
    router = index::attach_routes(router);
    router = events::attach_routes(router);
    router = auth::attach_routes(router);

    router = router
        .layer(Extension(md.accounts.clone()))
        .layer(Extension(platform.events.clone()))
        .layer(Extension(platform.auth.clone()))
        .layer(Extension(crate::auth::Config::from(cfg)));

    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(print_request_response))
}
