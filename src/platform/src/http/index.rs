use axum::routing::get;
use axum::Router;
use common::http::Hal;
use common::http::Links;
use common::http::INDEX_PATH;
use serde::Serialize;

use crate::events::EVENTS_PATH;

#[derive(Serialize)]
struct IndexResponse {
    #[serde(rename = "_links")]
    links: Links,
}

async fn index() -> Hal<IndexResponse> {
    Hal(IndexResponse {
        links: Links::new().add("events", EVENTS_PATH),
    })
}

pub fn attach_routes(router: Router) -> Router {
    router.route(INDEX_PATH, get(index))
}
