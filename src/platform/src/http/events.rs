use std::sync::Arc;

use axum::extract::Extension;
use axum::extract::Path;
use axum::extract::Query;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing;
use axum::Router;
use common::http::Hal;
use common::http::Json;

use crate::events::event_path;
use crate::events::EventRequest;
use crate::events::EventResource;
use crate::events::Events;
use crate::events::EventsPage;
use crate::events::ListEventsParams;
use crate::events::EVENTS_PATH;
use crate::Context;
use crate::Result;

async fn create(
    ctx: Context,
    Extension(provider): Extension<Arc<Events>>,
    Json(request): Json<EventRequest>,
) -> Result<Response> {
    let resource = provider.create(ctx, request).await?;
    let location = event_path(resource.event.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Hal(resource),
    )
        .into_response())
}

async fn get_by_id(
    ctx: Context,
    Extension(provider): Extension<Arc<Events>>,
    Path(event_id): Path<u64>,
) -> Result<Hal<EventResource>> {
    Ok(Hal(provider.get_by_id(ctx, event_id).await?))
}

async fn list(
    ctx: Context,
    Extension(provider): Extension<Arc<Events>>,
    Query(params): Query<ListEventsParams>,
) -> Result<Hal<EventsPage>> {
    Ok(Hal(provider.list(ctx, params).await?))
}

async fn update(
    ctx: Context,
    Extension(provider): Extension<Arc<Events>>,
    Path(event_id): Path<u64>,
    Json(request): Json<EventRequest>,
) -> Result<Hal<EventResource>> {
    Ok(Hal(provider.update(ctx, event_id, request).await?))
}

pub fn attach_routes(router: Router) -> Router {
    router.nest(
        EVENTS_PATH,
        Router::new()
            .route("/", routing::post(create).get(list))
            .route("/:event_id", routing::get(get_by_id).put(update)),
    )
}
