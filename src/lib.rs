//! recordbase - generic repository and business-service layer on SeaORM
//!
//! This library provides the scaffolding for CRUD backends: audited entity
//! records, a generic repository with paged/sorted/filtered listing and
//! optimistic-concurrency persistence, and a business-service layer that
//! turns raw listing input into a page plus paging metadata.
//!
//! # Modules
//!
//! * [`config`] - Configuration loading and validation
//! * [`entities`] - SeaORM entity models
//! * [`key`] - Primary-key field resolution
//! * [`repositories`] - Repository contract and SeaORM implementation
//! * [`services`] - Business services with search and paging metadata
//! * [`storage`] - Connection and schema bootstrap

/// Configuration module for managing application settings
pub mod config;

/// Paging, sort and configuration defaults
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Error taxonomy for data access
pub mod error;

/// Primary-key field resolution with per-type caching
pub mod key;

/// Logging setup driven by configuration
pub mod logger;

/// Shallow field copy between record shapes
pub mod mapping;

/// Lifecycle state, audit columns and search filters
pub mod record;

/// Repository layer for database operations
pub mod repositories;

/// Business services built on repositories
pub mod services;

/// Backing store connection and schema setup
pub mod storage;

pub use entities::{account, product};
pub use error::{DataError, DataResult};
pub use record::{AuditedEntity, Filter, Lifecycle, LifecycleState};
pub use repositories::{ListCriteria, PagedRecords, Paging, Repository, SeaOrmRepository};
pub use services::{BusinessService, EntityService, ListRequest, ListResult, ProductService};
pub use storage::Storage;
