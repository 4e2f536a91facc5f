//! Error taxonomy for the data-access and service layers.

use sea_orm::DbErr;

/// Errors surfaced by repositories and business services.
///
/// Store failures are wrapped into [`DataError::Database`]; none of these are
/// retried internally.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    #[error("Predicate on {entity} matched more than one record")]
    AmbiguousMatch { entity: String },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Unknown sort column '{column}' for {entity}")]
    UnknownSortColumn { entity: String, column: String },

    #[error("Unknown field '{field}' for {entity}")]
    UnknownField { entity: String, field: String },

    #[error("Concurrency token mismatch on {entity} {key}: record was modified by another writer")]
    ConcurrencyConflict { entity: String, key: String },

    #[error("Query on {entity} exceeded {seconds}s timeout")]
    Timeout { entity: String, seconds: u64 },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl DataError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        DataError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Whether this error originated in the backing store (commit failures,
    /// concurrency conflicts, timeouts) rather than in caller input.
    pub fn is_data_access(&self) -> bool {
        matches!(
            self,
            DataError::Database(_) | DataError::ConcurrencyConflict { .. } | DataError::Timeout { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound { .. })
    }
}

pub type DataResult<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_access_classification() {
        let conflict = DataError::ConcurrencyConflict {
            entity: "products".to_string(),
            key: "1".to_string(),
        };
        assert!(conflict.is_data_access());
        assert!(DataError::Database(DbErr::Custom("boom".to_string())).is_data_access());
        assert!(!DataError::invalid("sort_column", "blank").is_data_access());
        assert!(!DataError::AmbiguousMatch {
            entity: "products".to_string()
        }
        .is_data_access());
    }

    #[test]
    fn test_error_messages() {
        let err = DataError::UnknownSortColumn {
            entity: "products".to_string(),
            column: "Colour".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown sort column 'Colour' for products");
    }
}
