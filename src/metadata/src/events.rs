use std::sync::Arc;

use bincode::deserialize;
use bincode::serialize;
use chrono::DateTime;
use chrono::NaiveDateTime;
use chrono::Utc;
use rocksdb::Transaction;
use rocksdb::TransactionDB;
use serde::Deserialize;
use serde::Serialize;

use crate::error::MetadataError;
use crate::index::next_seq;
use crate::list_data;
use crate::make_data_value_key;
use crate::make_id_seq_key;
use crate::metadata::ListResponse;
use crate::metadata::ResponseMetadata;
use crate::Result;

const NAMESPACE: &[u8] = b"events";

/// Recomputes the stored `free`/`offline` flags from their source fields.
/// Invoked inside every create and update transaction so the persisted
/// flags can never diverge from prices and location.
pub fn derive_flags(base_price: u64, max_price: u64, location: Option<&str>) -> (bool, bool) {
    let free = base_price == 0 && max_price == 0;
    let offline = location.map_or(false, |l| !l.trim().is_empty());

    (free, offline)
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    BeganEnrollment,
    ClosedEnrollment,
    Started,
    Ended,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<u64>,
    pub owner_id: Option<u64>,
    pub name: String,
    pub description: String,
    pub begin_enrollment: NaiveDateTime,
    pub close_enrollment: NaiveDateTime,
    pub begin_event: NaiveDateTime,
    pub end_event: NaiveDateTime,
    pub location: Option<String>,
    pub base_price: u64,
    pub max_price: u64,
    pub limit_of_enrollment: u64,
    pub free: bool,
    pub offline: bool,
    pub status: EventStatus,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateEventRequest {
    pub created_by: Option<u64>,
    pub name: String,
    pub description: String,
    pub begin_enrollment: NaiveDateTime,
    pub close_enrollment: NaiveDateTime,
    pub begin_event: NaiveDateTime,
    pub end_event: NaiveDateTime,
    pub location: Option<String>,
    pub base_price: u64,
    pub max_price: u64,
    pub limit_of_enrollment: u64,
}

/// Full-payload overlay. Identity, owner and status are never part of it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpdateEventRequest {
    pub updated_by: Option<u64>,
    pub name: String,
    pub description: String,
    pub begin_enrollment: NaiveDateTime,
    pub close_enrollment: NaiveDateTime,
    pub begin_event: NaiveDateTime,
    pub end_event: NaiveDateTime,
    pub location: Option<String>,
    pub base_price: u64,
    pub max_price: u64,
    pub limit_of_enrollment: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    BasePrice,
    BeginEvent,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug)]
pub struct ListEventsRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Option<(SortField, SortOrder)>,
}

pub struct Events {
    db: Arc<TransactionDB>,
}

impl Events {
    pub fn new(db: Arc<TransactionDB>) -> Self {
        Events { db }
    }

    fn get_by_id_(&self, tx: &Transaction<TransactionDB>, id: u64) -> Result<Event> {
        let key = make_data_value_key(NAMESPACE, id);

        match tx.get(key)? {
            None => Err(MetadataError::NotFound(format!("event {id} not found"))),
            Some(value) => Ok(deserialize(&value)?),
        }
    }

    pub fn create(&self, req: CreateEventRequest) -> Result<Event> {
        let tx = self.db.transaction();

        let created_at = Utc::now();
        let id = next_seq(&tx, make_id_seq_key(NAMESPACE))?;
        let (free, offline) = derive_flags(req.base_price, req.max_price, req.location.as_deref());

        let event = Event {
            id,
            created_at,
            updated_at: None,
            updated_by: None,
            owner_id: req.created_by,
            name: req.name,
            description: req.description,
            begin_enrollment: req.begin_enrollment,
            close_enrollment: req.close_enrollment,
            begin_event: req.begin_event,
            end_event: req.end_event,
            location: req.location,
            base_price: req.base_price,
            max_price: req.max_price,
            limit_of_enrollment: req.limit_of_enrollment,
            free,
            offline,
            status: EventStatus::Draft,
        };
        let data = serialize(&event)?;
        tx.put(make_data_value_key(NAMESPACE, event.id), &data)?;
        tx.commit()?;

        Ok(event)
    }

    pub fn get_by_id(&self, id: u64) -> Result<Event> {
        let tx = self.db.transaction();

        self.get_by_id_(&tx, id)
    }

    pub fn list(&self, req: ListEventsRequest) -> Result<ListResponse<Event>> {
        let tx = self.db.transaction();
        let mut events: Vec<Event> = list_data(&tx, NAMESPACE)?;

        if let Some((field, order)) = req.sort {
            events.sort_by(|l, r| {
                let ord = match field {
                    SortField::Id => l.id.cmp(&r.id),
                    SortField::Name => l.name.cmp(&r.name),
                    SortField::BasePrice => l.base_price.cmp(&r.base_price),
                    SortField::BeginEvent => l.begin_event.cmp(&r.begin_event),
                };
                match order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
        }

        let total = events.len() as u64;
        let data = events
            .into_iter()
            .skip((req.page.saturating_mul(req.size)) as usize)
            .take(req.size as usize)
            .collect();

        Ok(ListResponse {
            data,
            meta: ResponseMetadata {
                page: req.page,
                size: req.size,
                total,
            },
        })
    }

    pub fn update(&self, event_id: u64, req: UpdateEventRequest) -> Result<Event> {
        let tx = self.db.transaction();

        let mut event = self.get_by_id_(&tx, event_id)?;
        event.name = req.name;
        event.description = req.description;
        event.begin_enrollment = req.begin_enrollment;
        event.close_enrollment = req.close_enrollment;
        event.begin_event = req.begin_event;
        event.end_event = req.end_event;
        event.location = req.location;
        event.base_price = req.base_price;
        event.max_price = req.max_price;
        event.limit_of_enrollment = req.limit_of_enrollment;

        let (free, offline) =
            derive_flags(event.base_price, event.max_price, event.location.as_deref());
        event.free = free;
        event.offline = offline;
        event.updated_at = Some(Utc::now());
        event.updated_by = req.updated_by;

        let data = serialize(&event)?;
        tx.put(make_data_value_key(NAMESPACE, event.id), &data)?;
        tx.commit()?;

        Ok(event)
    }
}
