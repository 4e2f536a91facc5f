//! Product service with keyword search over name, colour and external id.

use sea_orm::sea_query::LikeExpr;
use sea_orm::{ColumnTrait, Condition};

use super::BusinessService;
use crate::entities::product;
use crate::record::Filter;
use crate::repositories::SeaOrmRepository;

const LIKE_ESCAPE: char = '\\';

/// `%keyword%` with the keyword's own `%`, `_` and escape characters matched literally.
fn contains_text(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn contains_pattern(keyword: &str) -> LikeExpr {
    LikeExpr::new(contains_text(keyword)).escape(LIKE_ESCAPE)
}

pub struct ProductService {
    repository: SeaOrmRepository<product::Entity>,
}

impl ProductService {
    pub fn new(repository: SeaOrmRepository<product::Entity>) -> Self {
        Self { repository }
    }
}

impl BusinessService<product::Entity> for ProductService {
    type Repo = SeaOrmRepository<product::Entity>;

    fn repository(&self) -> &Self::Repo {
        &self.repository
    }

    /// A product matches when any keyword appears in its name, colour or
    /// external id. Blank keywords are skipped.
    fn search_filter(&self, keywords: &[String]) -> Filter {
        let mut condition = Condition::any();
        let mut searched = false;
        for keyword in keywords.iter().filter(|k| !k.trim().is_empty()) {
            searched = true;
            condition = condition
                .add(product::Column::Name.like(contains_pattern(keyword)))
                .add(product::Column::Colour.like(contains_pattern(keyword)))
                .add(product::Column::ExternalId.like(contains_pattern(keyword)));
        }

        if searched {
            Filter::predicate(condition)
        } else {
            Filter::All
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{Database, DatabaseConnection};
    use std::time::Duration;

    async fn service() -> ProductService {
        let conn: DatabaseConnection = Database::connect("sqlite::memory:").await.unwrap();
        ProductService::new(SeaOrmRepository::new(conn, Duration::from_secs(5)))
    }

    #[tokio::test]
    async fn test_no_keywords_matches_all() {
        let service = service().await;
        assert!(service.search_filter(&[]).is_all());
        assert!(service.search_filter(&["".to_string(), "  ".to_string()]).is_all());
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_text("red"), "%red%");
        assert_eq!(contains_text("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[tokio::test]
    async fn test_keywords_build_predicate() {
        let service = service().await;
        let filter = service.search_filter(&["red".to_string(), "blue".to_string()]);
        assert!(!filter.is_all());
    }
}
