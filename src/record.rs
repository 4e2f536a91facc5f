//! Entity capabilities shared by every persisted record.
//!
//! Concrete records are plain SeaORM models. Instead of inheriting from a
//! common base they implement two small traits: [`Lifecycle`] on the model
//! (pending mutation intent) and [`AuditedEntity`] on the entity (which
//! columns hold the audit and concurrency fields).

use sea_orm::{Condition, EntityTrait, QueryFilter, Select};
use serde::{Deserialize, Serialize};

use crate::key::{self, KeyDescriptor};

/// Caller-declared mutation intent, consulted by persist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    #[default]
    Unchanged,
    Added,
    Modified,
    Deleted,
}

impl LifecycleState {
    pub fn is_pending(self) -> bool {
        self != LifecycleState::Unchanged
    }
}

/// Access to the in-memory lifecycle tag of a model.
pub trait Lifecycle {
    fn lifecycle_state(&self) -> LifecycleState;
    fn set_lifecycle_state(&mut self, state: LifecycleState);
}

/// Column metadata the repository needs to stamp and guard writes.
pub trait AuditedEntity: EntityTrait {
    fn created_at_column() -> Self::Column;
    fn modified_at_column() -> Self::Column;
    fn concurrency_token_column() -> Self::Column;

    /// Nullable boolean soft-delete marker, if the record type has one.
    fn soft_delete_column() -> Option<Self::Column> {
        None
    }

    /// Remove the row on `Deleted` instead of setting the soft-delete marker.
    /// Types without a marker column always delete physically.
    fn deletes_physically() -> bool {
        false
    }

    /// Explicit key declaration. When absent the key is resolved from the
    /// entity's primary-key metadata.
    fn key_descriptor() -> Option<KeyDescriptor> {
        None
    }

    /// Map a caller-supplied sort column name to a real column.
    ///
    /// Accepts PascalCase field names (`CreatedAt`) as well as raw column
    /// names (`created_at`), case-insensitively. Anything else is rejected.
    fn sort_column(name: &str) -> Option<Self::Column> {
        key::column_for_field::<Self>(name)
    }
}

/// Search predicate applied to listing and lookup queries.
///
/// `All` applies no `WHERE` clause at all, which keeps it distinct from a
/// predicate that happens to match nothing.
#[derive(Clone, Debug, Default)]
pub enum Filter {
    #[default]
    All,
    Predicate(Condition),
}

impl Filter {
    pub fn predicate(condition: Condition) -> Self {
        Filter::Predicate(condition)
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }

    pub fn apply<E: EntityTrait>(&self, select: Select<E>) -> Select<E> {
        match self {
            Filter::All => select,
            Filter::Predicate(condition) => select.filter(condition.clone()),
        }
    }
}

impl From<Condition> for Filter {
    fn from(condition: Condition) -> Self {
        Filter::Predicate(condition)
    }
}

impl From<sea_orm::sea_query::SimpleExpr> for Filter {
    fn from(expr: sea_orm::sea_query::SimpleExpr) -> Self {
        Filter::Predicate(Condition::all().add(expr))
    }
}
