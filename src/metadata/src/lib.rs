pub mod accounts;
pub mod error;
pub mod events;
pub mod index;
pub mod metadata;
pub mod rocksdb;

use ::rocksdb::Direction;
use ::rocksdb::IteratorMode;
use ::rocksdb::Transaction;
use ::rocksdb::TransactionDB;
use bincode::deserialize;
use serde::de::DeserializeOwned;

pub use crate::error::Result;
pub use crate::metadata::MetadataProvider;

pub fn make_data_value_key(ns: &[u8], id: u64) -> Vec<u8> {
    [ns, b"/data/", id.to_le_bytes().as_ref()].concat()
}

pub fn make_data_key(ns: &[u8]) -> Vec<u8> {
    [ns, b"/data"].concat()
}

pub fn make_index_key(ns: &[u8], idx_name: &[u8], key: &str) -> Vec<u8> {
    [ns, b"/idx/", idx_name, b"/", key.as_bytes()].concat()
}

pub fn make_id_seq_key(ns: &[u8]) -> Vec<u8> {
    [ns, b"/id_seq"].concat()
}

pub fn list_data<T>(tx: &Transaction<TransactionDB>, ns: &[u8]) -> Result<Vec<T>>
where T: DeserializeOwned {
    let prefix = make_data_key(ns);

    let mut list = Vec::new();
    for kv in tx.iterator(IteratorMode::From(prefix.as_slice(), Direction::Forward)) {
        let (key, value) = kv?;
        if !key.starts_with(prefix.as_slice()) {
            break;
        }
        list.push(deserialize(&value)?);
    }

    Ok(list)
}
