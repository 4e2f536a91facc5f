//! Business-service layer.
//!
//! Services sit on top of a [`Repository`] and turn raw listing input
//! (optional paging, sort and comma-separated search terms) into a
//! [`ListResult`] carrying the page plus everything a caller needs to render
//! paging controls. Find and persist are forwarded unchanged.

pub mod product;

use async_trait::async_trait;
use log::debug;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use crate::constants::{DEFAULT_SORT_COLUMN, DEFAULT_SORT_DIRECTION, KEYWORD_SEPARATOR};
use crate::error::DataResult;
use crate::record::Filter;
use crate::repositories::{ListCriteria, Repository};

pub use product::ProductService;

/// Raw listing input as it arrives from a caller.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListRequest {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_column: Option<String>,
    pub sort_direction: Option<String>,
    pub search_terms: Option<String>,
}

impl ListRequest {
    pub fn page(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number: Some(page_number),
            page_size: Some(page_size),
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, column: impl Into<String>, direction: impl Into<String>) -> Self {
        self.sort_column = Some(column.into());
        self.sort_direction = Some(direction.into());
        self
    }

    pub fn searching(mut self, search_terms: impl Into<String>) -> Self {
        self.search_terms = Some(search_terms.into());
        self
    }
}

/// A page of records with echoed request parameters and paging metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<M> {
    pub keywords: Vec<String>,
    pub list: Vec<M>,
    pub sort_col: String,
    pub sort_dir: String,
    pub offset: u64,
    pub page_index: u64,
    pub size_of_page: u64,
    pub offset_upper_bound: u64,
    pub total_number_of_records: u64,
    pub total_number_of_pages: u64,
    pub search_terms: String,
}

/// Split comma-separated search terms. Terms are kept exactly as typed.
pub fn split_keywords(search_terms: Option<&str>) -> Vec<String> {
    match search_terms {
        Some(terms) if !terms.trim().is_empty() => terms.split(KEYWORD_SEPARATOR).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[async_trait]
pub trait BusinessService<E>: Send + Sync
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    type Repo: Repository<E>;

    fn repository(&self) -> &Self::Repo;

    /// Build the search predicate for a keyword list.
    ///
    /// The default ignores keywords and matches everything; record types with
    /// searchable text override this.
    fn search_filter(&self, _keywords: &[String]) -> Filter {
        Filter::All
    }

    async fn list_items(&self, request: ListRequest) -> DataResult<ListResult<E::Model>> {
        let sort_col = or_default(request.sort_column, DEFAULT_SORT_COLUMN);
        let sort_dir = or_default(request.sort_direction, DEFAULT_SORT_DIRECTION);
        let keywords = split_keywords(request.search_terms.as_deref());
        let filter = self.search_filter(&keywords);
        debug!("Listing with {} keyword(s), filtered: {}", keywords.len(), !filter.is_all());

        let criteria = ListCriteria {
            page_number: request.page_number,
            page_size: request.page_size,
            sort_column: Some(sort_col.clone()),
            sort_direction: Some(sort_dir.clone()),
            filter,
        };
        let page = self.repository().find_all_by_criteria(&criteria).await?;
        let paging = page.paging;
        let total = page.total_records;

        Ok(ListResult {
            search_terms: keywords.join(KEYWORD_SEPARATOR),
            keywords,
            list: page.records,
            sort_col,
            sort_dir,
            offset: paging.offset(),
            page_index: paging.page_index,
            size_of_page: paging.size_of_page,
            offset_upper_bound: paging.offset_upper_bound(total),
            total_number_of_records: total,
            total_number_of_pages: paging.total_pages(total),
        })
    }

    async fn find_entity_by_id(&self, id: i64) -> DataResult<Option<E::Model>> {
        self.repository().find_by_id(id).await
    }

    async fn persist_entity(&self, entity: &mut E::Model) -> DataResult<bool> {
        self.repository().persist(entity).await
    }
}

/// Service with no keyword search, usable for any record type.
pub struct EntityService<E, R> {
    repository: R,
    _marker: PhantomData<fn() -> E>,
}

impl<E, R> EntityService<E, R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            _marker: PhantomData,
        }
    }
}

impl<E, R> BusinessService<E> for EntityService<E, R>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    R: Repository<E>,
{
    type Repo = R;

    fn repository(&self) -> &R {
        &self.repository
    }
}
