use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dishstock_core::{ArticleId, DomainError, DomainResult};

/// Categories offered by the article form. Free text is still accepted; these
/// are only the suggestions shown alongside the prompt.
pub const CATEGORIES: &[&str] = &[
    "Plates", "Glasses", "Cutlery", "Dishes", "Bowls", "Cups", "Other",
];

/// Unit labels offered by the article form.
pub const UNITS: &[&str] = &["piece", "lot", "set", "kg", "g"];

/// Unit applied when a draft leaves the unit blank.
pub const DEFAULT_UNIT: &str = "piece";

/// Stock level of an article relative to its minimum threshold.
///
/// Pure function of `(quantity, threshold)` for non-negative quantities:
/// `quantity == 0` is exhausted, `0 < quantity <= threshold` is low,
/// `quantity > threshold` is normal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockLevel {
    Exhausted,
    Low,
    Normal,
}

impl StockLevel {
    pub fn classify(quantity: i64, threshold: i64) -> Self {
        if quantity == 0 {
            StockLevel::Exhausted
        } else if quantity <= threshold {
            StockLevel::Low
        } else {
            StockLevel::Normal
        }
    }
}

impl core::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StockLevel::Exhausted => write!(f, "Exhausted"),
            StockLevel::Low => write!(f, "Low stock"),
            StockLevel::Normal => write!(f, "Normal"),
        }
    }
}

/// An inventory article (the root entity): a kind of dishware tracked by
/// quantity.
///
/// # Invariants
/// - `quantity` is never negative.
/// - `quantity` equals the creation-time quantity plus all recorded stock
///   entries minus all recorded stock exits; the store keeps the two in sync
///   inside one transaction per movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub unit: String,
    pub unit_price: f64,
    pub min_threshold: i64,
    pub created_at: DateTime<Utc>,
}

impl Article {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(self.quantity, self.min_threshold)
    }

    /// Monetary value of the on-hand stock (quantity x unit price).
    pub fn stock_value(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Input for creating or updating an article, before the store assigned an
/// identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub unit: String,
    pub unit_price: f64,
    pub min_threshold: i64,
}

impl ArticleDraft {
    /// Validate the draft and return it with text fields trimmed.
    ///
    /// A blank unit falls back to [`DEFAULT_UNIT`], matching the schema
    /// default.
    pub fn normalized(self) -> DomainResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }

        let unit = match self.unit.trim() {
            "" => DEFAULT_UNIT.to_string(),
            u => u.to_string(),
        };

        if self.quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(DomainError::validation(
                "unit price must be a non-negative number",
            ));
        }
        if self.min_threshold < 0 {
            return Err(DomainError::validation(
                "minimum threshold cannot be negative",
            ));
        }

        Ok(Self {
            name,
            category,
            unit,
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ArticleDraft {
        ArticleDraft {
            name: "Dinner plate".to_string(),
            category: "Plates".to_string(),
            quantity: 40,
            unit: "piece".to_string(),
            unit_price: 2.5,
            min_threshold: 10,
        }
    }

    #[test]
    fn normalized_accepts_valid_draft() {
        let d = draft().normalized().unwrap();
        assert_eq!(d.name, "Dinner plate");
        assert_eq!(d.quantity, 40);
    }

    #[test]
    fn normalized_trims_text_fields() {
        let d = ArticleDraft {
            name: "  Soup bowl ".to_string(),
            category: " Bowls ".to_string(),
            ..draft()
        };
        let d = d.normalized().unwrap();
        assert_eq!(d.name, "Soup bowl");
        assert_eq!(d.category, "Bowls");
    }

    #[test]
    fn normalized_rejects_blank_name() {
        let d = ArticleDraft {
            name: "   ".to_string(),
            ..draft()
        };
        let err = d.normalized().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn normalized_rejects_blank_category() {
        let d = ArticleDraft {
            category: String::new(),
            ..draft()
        };
        assert!(d.normalized().is_err());
    }

    #[test]
    fn normalized_defaults_blank_unit() {
        let d = ArticleDraft {
            unit: "  ".to_string(),
            ..draft()
        };
        assert_eq!(d.normalized().unwrap().unit, DEFAULT_UNIT);
    }

    #[test]
    fn normalized_rejects_negative_quantity() {
        let d = ArticleDraft {
            quantity: -1,
            ..draft()
        };
        assert!(d.normalized().is_err());
    }

    #[test]
    fn normalized_rejects_negative_or_nan_price() {
        let d = ArticleDraft {
            unit_price: -0.01,
            ..draft()
        };
        assert!(d.normalized().is_err());

        let d = ArticleDraft {
            unit_price: f64::NAN,
            ..draft()
        };
        assert!(d.normalized().is_err());
    }

    #[test]
    fn normalized_rejects_negative_threshold() {
        let d = ArticleDraft {
            min_threshold: -5,
            ..draft()
        };
        assert!(d.normalized().is_err());
    }

    #[test]
    fn classify_zero_is_exhausted() {
        assert_eq!(StockLevel::classify(0, 10), StockLevel::Exhausted);
        assert_eq!(StockLevel::classify(0, 0), StockLevel::Exhausted);
    }

    #[test]
    fn classify_at_or_below_threshold_is_low() {
        assert_eq!(StockLevel::classify(1, 10), StockLevel::Low);
        assert_eq!(StockLevel::classify(10, 10), StockLevel::Low);
    }

    #[test]
    fn classify_above_threshold_is_normal() {
        assert_eq!(StockLevel::classify(11, 10), StockLevel::Normal);
        assert_eq!(StockLevel::classify(1, 0), StockLevel::Normal);
    }

    #[test]
    fn classify_worked_example() {
        // quantity=5 against threshold=10 is low; after an entry of 20 the
        // article sits at 25, which is normal.
        assert_eq!(StockLevel::classify(5, 10), StockLevel::Low);
        assert_eq!(StockLevel::classify(25, 10), StockLevel::Normal);
    }

    #[test]
    fn stock_value_multiplies_quantity_and_price() {
        let article = Article {
            id: ArticleId::new(1),
            quantity: 8,
            unit_price: 2.5,
            name: "Wine glass".to_string(),
            category: "Glasses".to_string(),
            unit: "piece".to_string(),
            min_threshold: 10,
            created_at: Utc::now(),
        };
        assert!((article.stock_value() - 20.0).abs() < f64::EPSILON);
        assert_eq!(article.stock_level(), StockLevel::Low);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: every non-negative (quantity, threshold) pair lands in
            /// exactly one level, and the level matches the defining ranges.
            #[test]
            fn classify_partitions_the_quantity_range(
                quantity in 0i64..100_000,
                threshold in 0i64..100_000,
            ) {
                let level = StockLevel::classify(quantity, threshold);
                match level {
                    StockLevel::Exhausted => prop_assert_eq!(quantity, 0),
                    StockLevel::Low => {
                        prop_assert!(quantity > 0);
                        prop_assert!(quantity <= threshold);
                    }
                    StockLevel::Normal => prop_assert!(quantity > threshold),
                }
            }

            /// Property: classification is monotonic in quantity for a fixed
            /// threshold (adding stock never moves the level downwards).
            #[test]
            fn classify_never_downgrades_when_stock_grows(
                quantity in 0i64..100_000,
                threshold in 0i64..100_000,
                gain in 1i64..1_000,
            ) {
                fn rank(level: StockLevel) -> u8 {
                    match level {
                        StockLevel::Exhausted => 0,
                        StockLevel::Low => 1,
                        StockLevel::Normal => 2,
                    }
                }

                let before = rank(StockLevel::classify(quantity, threshold));
                let after = rank(StockLevel::classify(quantity + gain, threshold));
                prop_assert!(after >= before);
            }
        }
    }
}
