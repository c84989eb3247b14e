use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};
use validator::{Validate, ValidationError};

use crate::error::{ItemError, ItemResult};

/// Calendar format accepted for `purchase_date`
pub const PURCHASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Custom validator for category labels
fn validate_category(category: &str) -> Result<(), ValidationError> {
    if category.parse::<Category>().is_err() {
        return Err(ValidationError::new("unknown_category"));
    }
    Ok(())
}

/// Custom validator for `YYYY-MM-DD` purchase dates
///
/// chrono alone accepts unpadded fields, leading whitespace and a `+` sign,
/// so the parsed date must also format back to the exact input.
fn validate_purchase_date(date: &str) -> Result<(), ValidationError> {
    match NaiveDate::parse_from_str(date, PURCHASE_DATE_FORMAT) {
        Ok(parsed) if parsed.format(PURCHASE_DATE_FORMAT).to_string() == date => Ok(()),
        _ => Err(ValidationError::new("invalid_purchase_date")),
    }
}

/// Item category
///
/// A closed set: validation and the category summary both enumerate it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
)]
pub enum Category {
    Watch,
    Bag,
    Jewelry,
    Shoes,
    Other,
}

impl Category {
    /// Canonical label used on input and in summaries
    pub const fn label(self) -> &'static str {
        match self {
            Category::Watch => "Watch",
            Category::Bag => "Bag",
            Category::Jewelry => "Jewelry",
            Category::Shoes => "Shoes",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = strum::ParseError;

    /// Exact, case-sensitive match against [`Category::label`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::iter()
            .find(|category| category.label() == s)
            .ok_or(strum::ParseError::VariantNotFound)
    }
}

/// Item entity - a single cataloged valuable good
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier; 0 until the repository assigns one
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub brand: String,
    /// Smallest currency unit, always > 0
    pub purchase_price: i64,
    /// `YYYY-MM-DD`
    pub purchase_date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new item
///
/// These rules are the only definition of a valid item; updates are checked
/// by rebuilding one of these from the merged fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateItemInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(custom(function = "validate_category"))]
    pub category: String,
    #[validate(length(min = 1))]
    pub brand: String,
    #[validate(range(min = 1))]
    pub purchase_price: i64,
    #[validate(length(min = 1), custom(function = "validate_purchase_date"))]
    pub purchase_date: String,
}

/// Partial update; `None` leaves the stored value unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub purchase_price: Option<i64>,
    pub purchase_date: Option<String>,
}

impl UpdateItemInput {
    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.brand.is_none()
            && self.purchase_price.is_none()
            && self.purchase_date.is_none()
    }
}

/// Item counts per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// Sum of every category count
    pub total: u64,
    /// Every known category, zero-filled
    pub categories: BTreeMap<Category, u64>,
}

impl CategorySummary {
    /// Build a summary from sparse counts (categories with no items may be absent)
    pub fn from_counts(counts: HashMap<Category, u64>) -> Self {
        let categories: BTreeMap<Category, u64> = Category::iter()
            .map(|category| (category, counts.get(&category).copied().unwrap_or(0)))
            .collect();
        let total = categories.values().sum();

        Self { total, categories }
    }

    /// Count for a single category
    pub fn count(&self, category: Category) -> u64 {
        self.categories.get(&category).copied().unwrap_or(0)
    }
}

impl Item {
    /// Validate input and build a new, not yet persisted item
    pub fn new(input: CreateItemInput) -> ItemResult<Self> {
        input.validate()?;

        let category = input.category.parse::<Category>().map_err(|_| {
            ItemError::InvalidInput(format!("unknown category '{}'", input.category))
        })?;

        let now = Utc::now();
        Ok(Self {
            id: 0,
            name: input.name,
            category,
            brand: input.brand,
            purchase_price: input.purchase_price,
            purchase_date: input.purchase_date,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overlay the present fields of `update` on a copy of this item
    ///
    /// The result passes the same checks as [`Item::new`]; id and timestamps
    /// are carried over untouched.
    pub fn merge(&self, update: UpdateItemInput) -> ItemResult<Self> {
        let candidate = CreateItemInput {
            name: update.name.unwrap_or_else(|| self.name.clone()),
            category: update
                .category
                .unwrap_or_else(|| self.category.label().to_string()),
            brand: update.brand.unwrap_or_else(|| self.brand.clone()),
            purchase_price: update.purchase_price.unwrap_or(self.purchase_price),
            purchase_date: update
                .purchase_date
                .unwrap_or_else(|| self.purchase_date.clone()),
        };

        let merged = Item::new(candidate)?;
        Ok(Self {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            ..merged
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemErrorKind;
    use chrono::TimeZone;

    fn valid_input() -> CreateItemInput {
        CreateItemInput {
            name: "Daytona".to_string(),
            category: "Watch".to_string(),
            brand: "ROLEX".to_string(),
            purchase_price: 1_500_000,
            purchase_date: "2023-01-15".to_string(),
        }
    }

    fn stored_item() -> Item {
        let created = Utc.with_ymd_and_hms(2025, 10, 24, 7, 24, 45).unwrap();
        Item {
            id: 1,
            name: "Daytona".to_string(),
            category: Category::Watch,
            brand: "ROLEX".to_string(),
            purchase_price: 1_500_000,
            purchase_date: "2023-01-15".to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_new_item_sets_fields_and_timestamps() {
        let item = Item::new(valid_input()).unwrap();

        assert_eq!(item.id, 0);
        assert_eq!(item.name, "Daytona");
        assert_eq!(item.category, Category::Watch);
        assert_eq!(item.brand, "ROLEX");
        assert_eq!(item.purchase_price, 1_500_000);
        assert_eq!(item.purchase_date, "2023-01-15");
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn test_new_item_rejects_invalid_fields() {
        let cases: [(&str, fn(&mut CreateItemInput)); 14] = [
            ("empty name", |i: &mut CreateItemInput| i.name.clear()),
            ("empty brand", |i: &mut CreateItemInput| i.brand.clear()),
            ("unknown category", |i: &mut CreateItemInput| {
                i.category = "Car".to_string()
            }),
            ("lowercase category", |i: &mut CreateItemInput| {
                i.category = "watch".to_string()
            }),
            ("zero price", |i: &mut CreateItemInput| i.purchase_price = 0),
            ("negative price", |i: &mut CreateItemInput| i.purchase_price = -100),
            ("empty date", |i: &mut CreateItemInput| i.purchase_date.clear()),
            ("unparseable date", |i: &mut CreateItemInput| {
                i.purchase_date = "2023/01/15".to_string()
            }),
            ("impossible date", |i: &mut CreateItemInput| {
                i.purchase_date = "2023-02-30".to_string()
            }),
            ("unpadded month and day", |i: &mut CreateItemInput| {
                i.purchase_date = "2023-1-5".to_string()
            }),
            ("unpadded day", |i: &mut CreateItemInput| {
                i.purchase_date = "2023-01-5".to_string()
            }),
            ("leading whitespace", |i: &mut CreateItemInput| {
                i.purchase_date = " 2023-01-05".to_string()
            }),
            ("signed year", |i: &mut CreateItemInput| {
                i.purchase_date = "+2023-01-05".to_string()
            }),
            ("trailing whitespace", |i: &mut CreateItemInput| {
                i.purchase_date = "2023-01-05 ".to_string()
            }),
        ];

        for (label, mutate) in cases {
            let mut input = valid_input();
            mutate(&mut input);

            let err = Item::new(input).unwrap_err();
            assert_eq!(err.kind(), ItemErrorKind::InvalidInput, "case: {label}");
        }
    }

    #[test]
    fn test_canonical_dates_accepted() {
        for date in ["2023-01-05", "2024-02-29", "1999-12-31"] {
            let input = CreateItemInput {
                purchase_date: date.to_string(),
                ..valid_input()
            };
            let item = Item::new(input).unwrap();
            assert_eq!(item.purchase_date, date);
        }
    }

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::iter() {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
            assert_eq!(category.to_string(), category.label());
        }
        assert_eq!(Category::iter().count(), 5);
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::Jewelry).unwrap();
        assert_eq!(json, "\"Jewelry\"");
    }

    #[test]
    fn test_merge_overwrites_only_present_fields() {
        let existing = stored_item();
        let merged = existing
            .merge(UpdateItemInput {
                purchase_price: Some(1_600_000),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(merged.purchase_price, 1_600_000);
        assert_eq!(merged.name, existing.name);
        assert_eq!(merged.category, existing.category);
        assert_eq!(merged.brand, existing.brand);
        assert_eq!(merged.purchase_date, existing.purchase_date);
        assert_eq!(merged.id, existing.id);
        assert_eq!(merged.created_at, existing.created_at);
        assert_eq!(merged.updated_at, existing.updated_at);
    }

    #[test]
    fn test_merge_revalidates() {
        let existing = stored_item();

        let err = existing
            .merge(UpdateItemInput {
                name: Some(String::new()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.is(ItemErrorKind::InvalidInput));

        let err = existing
            .merge(UpdateItemInput {
                category: Some("Furniture".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.is(ItemErrorKind::InvalidInput));
    }

    #[test]
    fn test_update_input_is_empty() {
        assert!(UpdateItemInput::default().is_empty());
        assert!(
            !UpdateItemInput {
                brand: Some(String::new()),
                ..Default::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn test_summary_zero_fills_categories() {
        let counts = HashMap::from([(Category::Watch, 2), (Category::Bag, 1)]);
        let summary = CategorySummary::from_counts(counts);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.categories.len(), 5);
        assert_eq!(summary.count(Category::Watch), 2);
        assert_eq!(summary.count(Category::Bag), 1);
        assert_eq!(summary.count(Category::Jewelry), 0);
        assert_eq!(summary.count(Category::Shoes), 0);
        assert_eq!(summary.count(Category::Other), 0);
    }

    #[test]
    fn test_summary_json_shape() {
        let summary = CategorySummary::from_counts(HashMap::from([(Category::Shoes, 4)]));
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["total"], 4);
        assert_eq!(json["categories"]["Shoes"], 4);
        assert_eq!(json["categories"]["Watch"], 0);
    }
}
