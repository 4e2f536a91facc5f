//! Paging and sort-direction arithmetic shared by repositories and services.

use sea_orm::Order;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, FALLBACK_PAGE_SIZE};
use crate::error::{DataError, DataResult};

const MAX_SKIP: u64 = i64::MAX as u64;

/// Effective page window after defaulting and clamping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    /// 1-based page index.
    pub page_index: u64,
    pub size_of_page: u64,
}

impl Paging {
    /// Apply the layered defaults to raw caller input.
    ///
    /// A missing page number or one below 1 becomes 1. A missing page size
    /// becomes 10, while a supplied size below 1 becomes 5.
    pub fn resolve(page_number: Option<i64>, page_size: Option<i64>) -> Self {
        let page_index = page_number.unwrap_or(DEFAULT_PAGE_NUMBER).max(1);
        let size_of_page = match page_size {
            None => DEFAULT_PAGE_SIZE,
            Some(size) if size < 1 => FALLBACK_PAGE_SIZE,
            Some(size) => size,
        };
        Self {
            page_index: page_index as u64,
            size_of_page: size_of_page as u64,
        }
    }

    /// Rows to skip before the first row of this page.
    ///
    /// Saturates at `i64::MAX`, the largest offset SQL can bind; pages that
    /// far out are simply empty.
    pub fn skip(&self) -> u64 {
        self.size_of_page
            .saturating_mul(self.page_index - 1)
            .min(MAX_SKIP)
    }

    /// 1-based position of the first row of this page.
    pub fn offset(&self) -> u64 {
        self.skip().saturating_add(1)
    }

    /// 1-based position of the last row of this page, never past `total_records`.
    pub fn offset_upper_bound(&self, total_records: u64) -> u64 {
        self.skip().saturating_add(self.size_of_page).min(total_records)
    }

    pub fn total_pages(&self, total_records: u64) -> u64 {
        total_records.div_ceil(self.size_of_page)
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse `ASC` / `DESC`, case-insensitively.
    pub fn parse(raw: &str) -> DataResult<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            other => Err(DataError::invalid(
                "sort_direction",
                format!("expected ASC or DESC, got '{}'", other),
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number_clamped() {
        for number in [-3, 0, 1] {
            assert_eq!(Paging::resolve(Some(number), Some(10)).page_index, 1);
        }
        assert_eq!(Paging::resolve(None, None).page_index, 1);
        assert_eq!(Paging::resolve(Some(4), None).page_index, 4);
    }

    #[test]
    fn test_page_size_asymmetry() {
        assert_eq!(Paging::resolve(None, None).size_of_page, 10);
        assert_eq!(Paging::resolve(None, Some(0)).size_of_page, 5);
        assert_eq!(Paging::resolve(None, Some(-7)).size_of_page, 5);
        assert_eq!(Paging::resolve(None, Some(25)).size_of_page, 25);
    }

    #[test]
    fn test_offsets() {
        let paging = Paging::resolve(Some(2), Some(10));
        assert_eq!(paging.skip(), 10);
        assert_eq!(paging.offset(), 11);
        assert_eq!(paging.offset_upper_bound(25), 20);

        let last = Paging::resolve(Some(3), Some(10));
        assert_eq!(last.offset(), 21);
        assert_eq!(last.offset_upper_bound(25), 25);
    }

    #[test]
    fn test_upper_bound_never_exceeds_total() {
        for total in 0..40u64 {
            for page in 1..6i64 {
                let paging = Paging::resolve(Some(page), Some(7));
                assert!(paging.offset_upper_bound(total) <= total);
            }
        }
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        for size in 1..12i64 {
            let paging = Paging::resolve(None, Some(size));
            for total in 0..50u64 {
                let expected = (total as f64 / size as f64).ceil() as u64;
                assert_eq!(paging.total_pages(total), expected);
            }
        }
    }

    #[test]
    fn test_huge_page_number_saturates() {
        let paging = Paging::resolve(Some(i64::MAX), Some(10));
        assert_eq!(paging.skip(), i64::MAX as u64);
        assert_eq!(paging.offset(), i64::MAX as u64 + 1);
        assert_eq!(paging.offset_upper_bound(25), 25);
        assert_eq!(paging.total_pages(25), 3);

        let wide = Paging::resolve(Some(i64::MAX), Some(i64::MAX));
        assert_eq!(wide.skip(), i64::MAX as u64);
        assert_eq!(wide.offset_upper_bound(7), 7);
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("asc").unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse("DESC").unwrap(), SortDirection::Desc);
        assert!(SortDirection::parse("sideways").is_err());
    }
}
