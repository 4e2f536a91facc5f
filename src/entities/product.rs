//! Product catalogue entry, keyed by the conventional `id` column.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::record::{AuditedEntity, Lifecycle, LifecycleState};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub external_id: String,
    pub name: String,
    pub colour: String,
    pub price_cents: i64,
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
    /// A new, not yet persisted product.
    pub fn new(external_id: impl Into<String>, name: impl Into<String>, colour: impl Into<String>, price_cents: i64) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: 0,
            external_id: external_id.into(),
            name: name.into(),
            colour: colour.into(),
            price_cents,
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
}
