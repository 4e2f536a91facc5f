//! Ledger account keyed by its account number rather than `id`.
//!
//! Accounts carry the soft-delete marker like every record, but are declared
//! as physically deleted: a `Deleted` lifecycle state removes the row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::record::{AuditedEntity, Lifecycle, LifecycleState};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub account_number: i32,
    pub external_id: String,
    pub name: String,
    pub owner: String,
    pub balance_cents: i64,
    pub created_at: DateTimeUtc,
    pub modified_at: DateTimeUtc,
    pub concurrency_token: Vec<u8>,
    pub is_deleted: Option<bool>,
    #[sea_orm(ignore)]
    #[serde(default)]
    pub lifecycle_state: LifecycleState,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(external_id: impl Into<String>, name: impl Into<String>, owner: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            account_number: 0,
            external_id: external_id.into(),
            name: name.into(),
            owner: owner.into(),
            balance_cents: 0,
            created_at: now,
            modified_at: now,
            concurrency_token: Vec::new(),
            is_deleted: None,
            lifecycle_state: LifecycleState::Added,
        }
    }
}

impl Lifecycle for Model {
    fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle_state
    }

    fn set_lifecycle_state(&mut self, state: LifecycleState) {
        self.lifecycle_state = state;
    }
}

impl AuditedEntity for Entity {
    fn created_at_column() -> Column {
        Column::CreatedAt
    }

    fn modified_at_column() -> Column {
        Column::ModifiedAt
    }

    fn concurrency_token_column() -> Column {
        Column::ConcurrencyToken
    }

    fn soft_delete_column() -> Option<Column> {
        Some(Column::IsDeleted)
    }

    fn deletes_physically() -> bool {
        true
    }
}
