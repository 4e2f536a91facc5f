//! Repository layer for database operations.
//!
//! This module defines the generic [`Repository`] contract and its SeaORM
//! implementation. Repositories keep entities as pure data models while
//! owning identity assignment, audit stamping and concurrency checks.

pub mod paging;
pub mod store;

use async_trait::async_trait;
use sea_orm::EntityTrait;

use crate::error::DataResult;
use crate::record::Filter;

pub use paging::{Paging, SortDirection};
pub use store::SeaOrmRepository;

/// Parameters of a paged, sorted, filtered listing.
#[derive(Clone, Debug, Default)]
pub struct ListCriteria {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_column: Option<String>,
    pub sort_direction: Option<String>,
    pub filter: Filter,
}

/// One page of records plus the size of the whole filtered set.
#[derive(Clone, Debug, PartialEq)]
pub struct PagedRecords<M> {
    pub records: Vec<M>,
    pub total_records: u64,
    pub paging: Paging,
}

/// Generic data-access contract over a single entity type.
#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    /// Get a single record by key. Filters on the resolved key field.
    async fn find_by_id(&self, id: i64) -> DataResult<Option<E::Model>>;

    /// Get the single record matching `filter`; more than one match is an error.
    async fn find_by_predicate(&self, filter: Filter) -> DataResult<Option<E::Model>>;

    /// Get every record matching `filter`, in store order.
    async fn find_all_by_predicate(&self, filter: Filter) -> DataResult<Vec<E::Model>>;

    /// Check whether a record with this key exists.
    async fn exists(&self, id: i64) -> DataResult<bool>;

    /// Get one sorted page of the records matching the criteria filter.
    async fn find_all_by_criteria(&self, criteria: &ListCriteria) -> DataResult<PagedRecords<E::Model>>;

    /// Insert, update or delete according to the model's lifecycle state.
    ///
    /// On success the model carries its assigned key, fresh timestamps and
    /// concurrency token, and is back in the `Unchanged` state.
    async fn persist(&self, entity: &mut E::Model) -> DataResult<bool>;
}
