//! Backing store bootstrap
//!
//! This module opens the SeaORM connection and creates tables from the
//! entity definitions for:
//! - Products
//! - Accounts

pub mod db;

pub use db::Storage;
