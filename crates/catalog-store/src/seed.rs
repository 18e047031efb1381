//! Built-in mock categories used by the admin dashboard.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::types::CategoryId;
use catalog_entity::category::{Category, CategoryStatus};

/// The mock category collection, in display order.
pub fn mock_categories() -> AppResult<Vec<Category>> {
    Ok(vec![
        record("cat1", "Men", "men", None, CategoryStatus::Active, 42, (2023, 1, 15), (2023, 6, 20))?,
        record("cat2", "Women", "women", None, CategoryStatus::Active, 36, (2023, 1, 15), (2023, 6, 20))?,
        record("cat3", "T-Shirts", "t-shirts", Some("cat1"), CategoryStatus::Active, 15, (2023, 2, 10), (2023, 5, 15))?,
        record("cat4", "Jeans", "jeans", Some("cat1"), CategoryStatus::Active, 20, (2023, 2, 12), (2023, 6, 1))?,
        record("cat5", "Dresses", "dresses", Some("cat2"), CategoryStatus::Active, 18, (2023, 3, 5), (2023, 6, 18))?,
        record("cat6", "Accessories", "accessories", None, CategoryStatus::Inactive, 0, (2023, 4, 22), (2023, 4, 22))?,
    ])
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    name: &str,
    slug: &str,
    parent: Option<&str>,
    status: CategoryStatus,
    product_count: u32,
    created: (i32, u32, u32),
    updated: (i32, u32, u32),
) -> AppResult<Category> {
    Ok(Category {
        id: CategoryId::new(id)?,
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        parent_id: parent.map(CategoryId::new).transpose()?,
        status,
        image: None,
        product_count,
        meta_title: None,
        meta_description: None,
        created_at: day(created)?,
        updated_at: day(updated)?,
    })
}

fn day((year, month, day): (i32, u32, u32)) -> AppResult<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .ok_or_else(|| AppError::internal(format!("Invalid seed date {year}-{month}-{day}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_stable() {
        let ids: Vec<String> = mock_categories()
            .expect("seed")
            .into_iter()
            .map(|c| c.id.into_inner())
            .collect();
        assert_eq!(ids, vec!["cat1", "cat2", "cat3", "cat4", "cat5", "cat6"]);
    }

    #[test]
    fn test_bad_seed_date_is_an_error() {
        let err = day((2023, 2, 30)).expect_err("no such day");
        assert_eq!(err.kind, catalog_core::error::ErrorKind::Internal);
    }

    #[test]
    fn test_seed_dates() {
        let seed = mock_categories().expect("seed");
        let first = &seed[0];
        assert_eq!(first.created_at.to_rfc3339(), "2023-01-15T00:00:00+00:00");
        assert!(first.updated_at > first.created_at);
    }
}
