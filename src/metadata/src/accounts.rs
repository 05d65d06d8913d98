use std::sync::Arc;

use bincode::deserialize;
use bincode::serialize;
use chrono::DateTime;
use chrono::Utc;
use common::rbac::Role;
use rocksdb::Transaction;
use rocksdb::TransactionDB;
use serde::Deserialize;
use serde::Serialize;

use crate::error::MetadataError;
use crate::index::check_insert_constraints;
use crate::index::get_index;
use crate::index::insert_index;
use crate::index::next_seq;
use crate::make_data_value_key;
use crate::make_id_seq_key;
use crate::make_index_key;
use crate::Result;

const NAMESPACE: &[u8] = b"accounts";
const IDX_EMAIL: &[u8] = b"email";

fn index_keys(email: &str) -> Vec<Option<Vec<u8>>> {
    [index_email_key(email)].to_vec()
}

fn index_email_key(email: &str) -> Option<Vec<u8>> {
    Some(make_index_key(NAMESPACE, IDX_EMAIL, email).to_vec())
}

pub struct Accounts {
    db: Arc<TransactionDB>,
}

impl Accounts {
    pub fn new(db: Arc<TransactionDB>) -> Self {
        Accounts { db }
    }

    fn get_by_id_(&self, tx: &Transaction<TransactionDB>, id: u64) -> Result<Account> {
        let key = make_data_value_key(NAMESPACE, id);

        match tx.get(key)? {
            None => Err(MetadataError::NotFound(format!("account {id} not found"))),
            Some(value) => Ok(deserialize(&value)?),
        }
    }

    pub fn create(&self, req: CreateAccountRequest) -> Result<Account> {
        let idx_keys = index_keys(&req.email);

        let tx = self.db.transaction();
        check_insert_constraints(&tx, idx_keys.as_ref())?;
        let created_at = Utc::now();
        let id = next_seq(&tx, make_id_seq_key(NAMESPACE))?;

        let account = req.into_account(id, created_at);

        let data = serialize(&account)?;
        tx.put(make_data_value_key(NAMESPACE, account.id), &data)?;

        insert_index(&tx, idx_keys.as_ref(), account.id)?;
        tx.commit()?;

        Ok(account)
    }

    pub fn get_by_id(&self, id: u64) -> Result<Account> {
        let tx = self.db.transaction();

        self.get_by_id_(&tx, id)
    }

    /// The not-found message carries the email so token-issuance callers can
    /// tell "no such user" from "wrong password" at their boundary.
    pub fn get_by_email(&self, email: &str) -> Result<Account> {
        let tx = self.db.transaction();
        let id = get_index(
            &tx,
            make_index_key(NAMESPACE, IDX_EMAIL, email),
            format!("account with email \"{email}\" not found").as_str(),
        )?;

        self.get_by_id_(&tx, id)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<u64>,
    pub password_hash: String,
    pub email: String,
    pub roles: Vec<Role>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateAccountRequest {
    pub created_by: Option<u64>,
    pub password_hash: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl CreateAccountRequest {
    pub fn into_account(self, id: u64, created_at: DateTime<Utc>) -> Account {
        Account {
            id,
            created_at,
            created_by: self.created_by,
            password_hash: self.password_hash,
            email: self.email,
            roles: self.roles,
        }
    }
}
