use std::sync::Arc;

use chrono::NaiveDateTime;
use common::http::ErrorRecord;
use common::http::Links;
use convert_case::Case;
use convert_case::Casing;
use metadata::events::EventStatus;
use metadata::events::Events as MDEvents;
use metadata::events::ListEventsRequest;
use metadata::events::SortField;
use metadata::events::SortOrder;
use metadata::metadata::ResponseMetadata;
use serde::Deserialize;
use serde::Serialize;
use validator::Validate;

use crate::Context;
use crate::PlatformError;
use crate::Result;

pub const EVENTS_PATH: &str = "/api/events";
pub const PROFILE_EVENTS_CREATE: &str = "/docs/index.html#resources-events-create";
pub const PROFILE_EVENTS_GET: &str = "/docs/index.html#resources-events-get";
pub const PROFILE_EVENTS_LIST: &str = "/docs/index.html#resources-events-list";
pub const PROFILE_EVENTS_UPDATE: &str = "/docs/index.html#resources-events-update";

const OBJECT_NAME: &str = "eventRequest";
const DEFAULT_PAGE_SIZE: u64 = 20;

pub fn event_path(id: u64) -> String {
    format!("{EVENTS_PATH}/{id}")
}

/// Create/update payload. Identity, owner, status and the derived flags are
/// not part of it; submitting them is rejected at deserialization.
#[derive(Serialize, Deserialize, Validate, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
    pub begin_enrollment_date_time: NaiveDateTime,
    pub close_enrollment_date_time: NaiveDateTime,
    pub begin_event_date_time: NaiveDateTime,
    pub end_event_date_time: NaiveDateTime,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub base_price: u64,
    #[serde(default)]
    pub max_price: u64,
    #[serde(default)]
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub limit_of_enrollment: u64,
}

/// Field-level pass first; the cross-field pass runs only on a payload whose
/// fields are individually well-formed.
fn validate_request(req: &EventRequest) -> Result<()> {
    if let Err(errors) = req.validate() {
        return Err(PlatformError::Validation(field_error_records(errors)));
    }

    let errors = cross_field_errors(req);
    if !errors.is_empty() {
        return Err(PlatformError::Validation(errors));
    }

    Ok(())
}

fn field_error_records(errors: validator::ValidationErrors) -> Vec<ErrorRecord> {
    let mut records = Vec::new();
    for (field, errs) in errors.field_errors() {
        for err in errs {
            let message = err
                .message
                .clone()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string());
            let mut record = ErrorRecord::field(
                OBJECT_NAME,
                field.to_case(Case::Camel),
                err.code.to_string(),
                message,
            );
            if let Some(value) = err.params.get("value") {
                record = record.with_rejected_value(value.clone());
            }
            records.push(record);
        }
    }

    records
}

/// Collects every violation; does not stop at the first one.
fn cross_field_errors(req: &EventRequest) -> Vec<ErrorRecord> {
    let mut errors = Vec::new();

    if req.max_price > 0 && req.base_price > req.max_price {
        errors.push(ErrorRecord::object(
            OBJECT_NAME,
            "wrongPrices",
            "values of prices are wrong",
        ));
    }
    if req.close_enrollment_date_time < req.begin_enrollment_date_time {
        errors.push(ErrorRecord::object(
            OBJECT_NAME,
            "wrongValue",
            "closeEnrollmentDateTime is earlier than beginEnrollmentDateTime",
        ));
    }
    if req.end_event_date_time < req.begin_event_date_time {
        errors.push(ErrorRecord::object(
            OBJECT_NAME,
            "wrongValue",
            "endEventDateTime is earlier than beginEventDateTime",
        ));
    }
    if req.end_event_date_time < req.close_enrollment_date_time {
        errors.push(ErrorRecord::object(
            OBJECT_NAME,
            "wrongValue",
            "endEventDateTime is earlier than closeEnrollmentDateTime",
        ));
    }
    if req.begin_event_date_time < req.close_enrollment_date_time {
        errors.push(ErrorRecord::object(
            OBJECT_NAME,
            "wrongValue",
            "beginEventDateTime is earlier than closeEnrollmentDateTime",
        ));
    }

    errors
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub begin_enrollment_date_time: NaiveDateTime,
    pub close_enrollment_date_time: NaiveDateTime,
    pub begin_event_date_time: NaiveDateTime,
    pub end_event_date_time: NaiveDateTime,
    pub location: Option<String>,
    pub base_price: u64,
    pub max_price: u64,
    pub limit_of_enrollment: u64,
    pub free: bool,
    pub offline: bool,
    pub event_status: EventStatus,
}

impl From<metadata::events::Event> for Event {
    fn from(event: metadata::events::Event) -> Self {
        Event {
            id: event.id,
            name: event.name,
            description: event.description,
            begin_enrollment_date_time: event.begin_enrollment,
            close_enrollment_date_time: event.close_enrollment,
            begin_event_date_time: event.begin_event,
            end_event_date_time: event.end_event,
            location: event.location,
            base_price: event.base_price,
            max_price: event.max_price,
            limit_of_enrollment: event.limit_of_enrollment,
            free: event.free,
            offline: event.offline,
            event_status: event.status,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EventResource {
    #[serde(flatten)]
    pub event: Event,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EventsPage {
    pub data: Vec<EventResource>,
    pub meta: ResponseMetadata,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListEventsParams {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub sort: Option<String>,
}

fn parse_sort(sort: &str) -> Result<(SortField, SortOrder)> {
    let (field, order) = match sort.split_once(',') {
        Some((field, order)) => (field, Some(order)),
        None => (sort, None),
    };

    let field = match field {
        "id" => SortField::Id,
        "name" => SortField::Name,
        "basePrice" => SortField::BasePrice,
        "beginEventDateTime" => SortField::BeginEvent,
        other => {
            return Err(PlatformError::BadRequest(format!(
                "unknown sort field {other:?}"
            )));
        }
    };

    let order = match order {
        None => SortOrder::Asc,
        Some(order) if order.eq_ignore_ascii_case("asc") => SortOrder::Asc,
        Some(order) if order.eq_ignore_ascii_case("desc") => SortOrder::Desc,
        Some(other) => {
            return Err(PlatformError::BadRequest(format!(
                "unknown sort order {other:?}"
            )));
        }
    };

    Ok((field, order))
}

fn create_links(event_id: u64) -> Links {
    let self_href = event_path(event_id);
    Links::new()
        .add("self", self_href.clone())
        .add("update-event", self_href)
        .add("query-events", EVENTS_PATH)
        .add("profile", PROFILE_EVENTS_CREATE)
}

/// The update-event link is the only authorization signal surfaced to
/// clients; it is present exactly for the authenticated owner.
fn read_links(event: &metadata::events::Event, ctx: &Context) -> Links {
    let mut links = Links::new()
        .add("self", event_path(event.id))
        .add("profile", PROFILE_EVENTS_GET);
    if ctx.account_id.is_some() && event.owner_id == ctx.account_id {
        links = links.add("update-event", event_path(event.id));
    }

    links
}

fn list_links(ctx: &Context) -> Links {
    let mut links = Links::new()
        .add("self", EVENTS_PATH)
        .add("profile", PROFILE_EVENTS_LIST);
    if ctx.account_id.is_some() {
        links = links.add("create-event", EVENTS_PATH);
    }

    links
}

fn update_links(event_id: u64) -> Links {
    Links::new()
        .add("self", event_path(event_id))
        .add("profile", PROFILE_EVENTS_UPDATE)
}

pub struct Events {
    prov: Arc<MDEvents>,
}

impl Events {
    pub fn new(prov: Arc<MDEvents>) -> Self {
        Self { prov }
    }

    pub async fn create(&self, ctx: Context, request: EventRequest) -> Result<EventResource> {
        validate_request(&request)?;

        let event = self.prov.create(metadata::events::CreateEventRequest {
            created_by: ctx.account_id,
            name: request.name,
            description: request.description,
            begin_enrollment: request.begin_enrollment_date_time,
            close_enrollment: request.close_enrollment_date_time,
            begin_event: request.begin_event_date_time,
            end_event: request.end_event_date_time,
            location: request.location,
            base_price: request.base_price,
            max_price: request.max_price,
            limit_of_enrollment: request.limit_of_enrollment,
        })?;

        let links = create_links(event.id);
        Ok(EventResource {
            event: event.into(),
            links,
        })
    }

    pub async fn get_by_id(&self, ctx: Context, event_id: u64) -> Result<EventResource> {
        let event = self.prov.get_by_id(event_id)?;

        let links = read_links(&event, &ctx);
        Ok(EventResource {
            event: event.into(),
            links,
        })
    }

    pub async fn list(&self, ctx: Context, params: ListEventsParams) -> Result<EventsPage> {
        let sort = match &params.sort {
            None => None,
            Some(sort) => Some(parse_sort(sort)?),
        };
        let resp = self.prov.list(ListEventsRequest {
            page: params.page.unwrap_or(0),
            size: params.size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort,
        })?;

        let data = resp
            .data
            .into_iter()
            .map(|event| {
                let links = Links::new().add("self", event_path(event.id));
                EventResource {
                    event: event.into(),
                    links,
                }
            })
            .collect();

        Ok(EventsPage {
            data,
            meta: resp.meta,
            links: list_links(&ctx),
        })
    }

    pub async fn update(
        &self,
        ctx: Context,
        event_id: u64,
        request: EventRequest,
    ) -> Result<EventResource> {
        validate_request(&request)?;

        let existing = self.prov.get_by_id(event_id)?;
        if let (Some(owner), Some(caller)) = (existing.owner_id, ctx.account_id) {
            if owner != caller {
                return Err(PlatformError::Unauthorized(format!(
                    "account {caller} is not the owner of event {event_id}"
                )));
            }
        }

        let event = self
            .prov
            .update(event_id, metadata::events::UpdateEventRequest {
                updated_by: ctx.account_id,
                name: request.name,
                description: request.description,
                begin_enrollment: request.begin_enrollment_date_time,
                close_enrollment: request.close_enrollment_date_time,
                begin_event: request.begin_event_date_time,
                end_event: request.end_event_date_time,
                location: request.location,
                base_price: request.base_price,
                max_price: request.max_price,
                limit_of_enrollment: request.limit_of_enrollment,
            })?;

        let links = update_links(event.id);
        Ok(EventResource {
            event: event.into(),
            links,
        })
    }
}
