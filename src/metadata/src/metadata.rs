use std::sync::Arc;

use rocksdb::TransactionDB;
use serde::Deserialize;
use serde::Serialize;

use crate::accounts::Accounts;
use crate::events::Events;
use crate::Result;

pub struct MetadataProvider {
    pub events: Arc<Events>,
    pub accounts: Arc<Accounts>,
}

impl MetadataProvider {
    pub fn try_new(db: Arc<TransactionDB>) -> Result<Self> {
        Ok(MetadataProvider {
            events: Arc::new(Events::new(db.clone())),
            accounts: Arc::new(Accounts::new(db)),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseMetadata {
    pub page: u64,
    pub size: u64,
    pub total: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub meta: ResponseMetadata,
}
