//! SeaORM-backed repository.

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IntoActiveModel, Iterable, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    Value,
};
use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;
use uuid::Uuid;

use super::{ListCriteria, PagedRecords, Paging, Repository, SortDirection};
use crate::error::{DataError, DataResult};
use crate::key::{entity_name, key_column};
use crate::record::{AuditedEntity, Filter, Lifecycle, LifecycleState};

/// Repository over any [`AuditedEntity`] stored through SeaORM.
///
/// Every store round-trip is bounded by `query_timeout`.
///
/// # Example
///
/// ```ignore
/// let repo = SeaOrmRepository::<product::Entity>::new(storage.conn.clone(), Duration::from_secs(30));
/// let page = repo.find_all_by_criteria(&ListCriteria::default()).await?;
/// ```
pub struct SeaOrmRepository<E> {
    conn: DatabaseConnection,
    query_timeout: Duration,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Clone for SeaOrmRepository<E> {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
            query_timeout: self.query_timeout,
            _marker: PhantomData,
        }
    }
}

impl<E: AuditedEntity> SeaOrmRepository<E> {
    pub fn new(conn: DatabaseConnection, query_timeout: Duration) -> Self {
        Self {
            conn,
            query_timeout,
            _marker: PhantomData,
        }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    async fn bounded<T, F>(&self, operation: F) -> DataResult<T>
    where
        F: Future<Output = Result<T, DbErr>>,
    {
        match tokio::time::timeout(self.query_timeout, operation).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                warn!("Query on {} timed out after {:?}", entity_name::<E>(), self.query_timeout);
                Err(DataError::Timeout {
                    entity: entity_name::<E>(),
                    seconds: self.query_timeout.as_secs(),
                })
            }
        }
    }

    /// Tell a stale concurrency token apart from a missing row.
    async fn write_rejected(&self, txn: &DatabaseTransaction, key_col: E::Column, key: i64) -> DataResult<DataError>
    where
        E::Model: Sync,
    {
        let still_there = self.bounded(E::find().filter(key_col.eq(key)).count(txn)).await? > 0;
        let entity = entity_name::<E>();
        if still_there {
            warn!("Concurrency conflict on {} {}", entity, key);
            Ok(DataError::ConcurrencyConflict {
                entity,
                key: key.to_string(),
            })
        } else {
            Ok(DataError::NotFound {
                entity,
                key: key.to_string(),
            })
        }
    }
}

fn new_token() -> Vec<u8> {
    Uuid::new_v4().as_bytes().to_vec()
}

fn key_value(value: Value) -> Option<i64> {
    match value {
        Value::TinyInt(Some(v)) => Some(v.into()),
        Value::SmallInt(Some(v)) => Some(v.into()),
        Value::Int(Some(v)) => Some(v.into()),
        Value::BigInt(Some(v)) => Some(v),
        Value::TinyUnsigned(Some(v)) => Some(v.into()),
        Value::SmallUnsigned(Some(v)) => Some(v.into()),
        Value::Unsigned(Some(v)) => Some(v.into()),
        Value::BigUnsigned(Some(v)) => i64::try_from(v).ok(),
        _ => None,
    }
}

fn blank_guard<'a>(value: Option<&'a str>, name: &'static str) -> DataResult<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DataError::invalid(name, "must not be blank"))
}

/// Active model with every column explicitly set from `model`.
fn fully_set<E>(model: &E::Model) -> E::ActiveModel
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Clone,
{
    let mut active = model.clone().into_active_model();
    for column in E::Column::iter() {
        active.set(column, model.get(column));
    }
    active
}

#[async_trait]
impl<E> Repository<E> for SeaOrmRepository<E>
where
    E: AuditedEntity,
    E::Model: Lifecycle + IntoActiveModel<E::ActiveModel> + Clone + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
{
    async fn find_by_id(&self, id: i64) -> DataResult<Option<E::Model>> {
        let key_col = key_column::<E>()?;
        self.bounded(E::find().filter(key_col.eq(id)).one(&self.conn)).await
    }

    async fn find_by_predicate(&self, filter: Filter) -> DataResult<Option<E::Model>> {
        // Two rows are enough to detect ambiguity.
        let mut matches = self.bounded(filter.apply(E::find()).limit(2).all(&self.conn)).await?;
        if matches.len() > 1 {
            return Err(DataError::AmbiguousMatch {
                entity: entity_name::<E>(),
            });
        }
        Ok(matches.pop())
    }

    async fn find_all_by_predicate(&self, filter: Filter) -> DataResult<Vec<E::Model>> {
        self.bounded(filter.apply(E::find()).all(&self.conn)).await
    }

    async fn exists(&self, id: i64) -> DataResult<bool> {
        let key_col = key_column::<E>()?;
        let count = self.bounded(E::find().filter(key_col.eq(id)).count(&self.conn)).await?;
        Ok(count > 0)
    }

    async fn find_all_by_criteria(&self, criteria: &ListCriteria) -> DataResult<PagedRecords<E::Model>> {
        let sort_name = blank_guard(criteria.sort_column.as_deref(), "sort_column")?;
        let direction = SortDirection::parse(blank_guard(criteria.sort_direction.as_deref(), "sort_direction")?)?;
        let sort_col = E::sort_column(sort_name).ok_or_else(|| DataError::UnknownSortColumn {
            entity: entity_name::<E>(),
            column: sort_name.to_string(),
        })?;
        let key_col = key_column::<E>()?;
        let paging = Paging::resolve(criteria.page_number, criteria.page_size);

        let query = criteria.filter.apply(E::find());
        let total_records = self.bounded(query.clone().count(&self.conn)).await?;
        let records = self
            .bounded(
                query
                    .order_by(sort_col, direction.into())
                    .order_by(key_col, sea_orm::Order::Asc)
                    .offset(paging.skip())
                    .limit(paging.size_of_page)
                    .all(&self.conn),
            )
            .await?;

        debug!(
            "Listed {} of {} {} (page {}, size {}, sort {} {})",
            records.len(),
            total_records,
            entity_name::<E>(),
            paging.page_index,
            paging.size_of_page,
            sort_name,
            direction.as_str()
        );

        Ok(PagedRecords {
            records,
            total_records,
            paging,
        })
    }

    async fn persist(&self, entity: &mut E::Model) -> DataResult<bool> {
        let key_col = key_column::<E>()?;
        let key = key_value(entity.get(key_col))
            .ok_or_else(|| DataError::invalid("key", format!("{} key is not an integer", entity_name::<E>())))?;
        let state = entity.lifecycle_state();
        let now = Utc::now();
        let token = new_token();
        let token_col = E::concurrency_token_column();

        let txn = self.bounded(self.conn.begin()).await?;

        let mut written = if state == LifecycleState::Added && key == 0 {
            let mut active = fully_set::<E>(entity);
            active.not_set(key_col);
            active.set(E::created_at_column(), now.into());
            active.set(E::modified_at_column(), now.into());
            active.set(token_col, token.into());
            self.bounded(active.insert(&txn)).await?
        } else if state == LifecycleState::Deleted && (E::deletes_physically() || E::soft_delete_column().is_none()) {
            let result = self
                .bounded(
                    E::delete_many()
                        .filter(key_col.eq(key))
                        .filter(token_col.eq(entity.get(token_col)))
                        .exec(&txn),
                )
                .await?;
            if result.rows_affected == 0 {
                return Err(self.write_rejected(&txn, key_col, key).await?);
            }
            entity.clone()
        } else {
            let mut active = fully_set::<E>(entity);
            active.not_set(key_col);
            active.not_set(E::created_at_column());
            active.set(E::modified_at_column(), now.into());
            active.set(token_col, token.clone().into());
            let soft_delete = E::soft_delete_column().filter(|_| state == LifecycleState::Deleted);
            if let Some(column) = soft_delete {
                active.set(column, Some(true).into());
            }

            let result = self
                .bounded(
                    E::update_many()
                        .set(active)
                        .filter(key_col.eq(key))
                        .filter(token_col.eq(entity.get(token_col)))
                        .exec(&txn),
                )
                .await?;
            if result.rows_affected == 0 {
                return Err(self.write_rejected(&txn, key_col, key).await?);
            }

            let mut updated = entity.clone();
            updated.set(E::modified_at_column(), now.into());
            updated.set(token_col, token.into());
            if let Some(column) = soft_delete {
                updated.set(column, Some(true).into());
            }
            updated
        };

        self.bounded(txn.commit()).await?;

        written.set_lifecycle_state(LifecycleState::Unchanged);
        info!(
            "Persisted {} {} ({:?})",
            entity_name::<E>(),
            key_value(written.get(key_col)).unwrap_or(key),
            state
        );
        *entity = written;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value_widths() {
        assert_eq!(key_value(Value::Int(Some(7))), Some(7));
        assert_eq!(key_value(Value::BigInt(Some(1 << 40))), Some(1 << 40));
        assert_eq!(key_value(Value::Int(None)), None);
        assert_eq!(key_value(Value::String(Some(Box::new("x".to_string())))), None);
    }

    #[test]
    fn test_blank_guard() {
        assert!(blank_guard(None, "sort_column").is_err());
        assert!(blank_guard(Some("  "), "sort_column").is_err());
        assert_eq!(blank_guard(Some(" Name "), "sort_column").unwrap(), "Name");
    }

    #[tokio::test]
    async fn test_slow_store_call_times_out() {
        let conn = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        let repo = SeaOrmRepository::<crate::entities::product::Entity>::new(conn, Duration::from_millis(20));

        let stalled = std::future::pending::<Result<(), DbErr>>();
        let err = repo.bounded(stalled).await.unwrap_err();

        assert!(matches!(err, DataError::Timeout { ref entity, seconds: 0 } if entity == "products"));
        assert!(err.is_data_access());
    }

    #[tokio::test]
    async fn test_fast_store_call_passes_through() {
        let conn = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        let repo = SeaOrmRepository::<crate::entities::product::Entity>::new(conn, Duration::from_secs(5));

        assert_eq!(repo.bounded(async { Ok::<_, DbErr>(7) }).await.unwrap(), 7);
        let err = repo
            .bounded(async { Err::<(), _>(DbErr::Custom("boom".to_string())) })
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Database(_)));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(new_token(), new_token());
        assert_eq!(new_token().len(), 16);
    }
}
