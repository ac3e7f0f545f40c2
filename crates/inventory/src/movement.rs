use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dishstock_core::{ArticleId, DomainError, DomainResult, StockEntryId, StockExitId};

/// Reasons offered by the stock-exit form.
pub const EXIT_REASONS: &[&str] = &["Use", "Loan", "Breakage", "Loss", "Donation", "Other"];

/// Direction of a stock movement, used by combined listings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    Entry,
    Exit,
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MovementKind::Entry => write!(f, "Entry"),
            MovementKind::Exit => write!(f, "Exit"),
        }
    }
}

/// A recorded stock entry (goods received). Never mutated after recording;
/// removed only when the owning article is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub id: StockEntryId,
    pub article_id: ArticleId,
    pub quantity: i64,
    pub date: NaiveDate,
    pub supplier: Option<String>,
    pub total_price: f64,
    pub comment: Option<String>,
}

/// A recorded stock exit (goods issued). Same lifecycle as [`StockEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockExit {
    pub id: StockExitId,
    pub article_id: ArticleId,
    pub quantity: i64,
    pub date: NaiveDate,
    pub reason: String,
    pub actor: Option<String>,
    pub comment: Option<String>,
}

/// Input for recording a stock entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub article_id: ArticleId,
    pub quantity: i64,
    pub date: NaiveDate,
    pub supplier: Option<String>,
    pub total_price: f64,
    pub comment: Option<String>,
}

impl EntryDraft {
    /// Validate the draft and return it with optional text fields trimmed
    /// (blank becomes absent).
    pub fn normalized(self) -> DomainResult<Self> {
        if self.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if !self.total_price.is_finite() || self.total_price < 0.0 {
            return Err(DomainError::validation(
                "total price must be a non-negative number",
            ));
        }

        Ok(Self {
            supplier: clean(self.supplier),
            comment: clean(self.comment),
            ..self
        })
    }
}

/// Input for recording a stock exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitDraft {
    pub article_id: ArticleId,
    pub quantity: i64,
    pub date: NaiveDate,
    pub reason: String,
    pub actor: Option<String>,
    pub comment: Option<String>,
}

impl ExitDraft {
    pub fn normalized(self) -> DomainResult<Self> {
        if self.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        let reason = self.reason.trim().to_string();
        if reason.is_empty() {
            return Err(DomainError::validation("reason cannot be empty"));
        }

        Ok(Self {
            reason,
            actor: clean(self.actor),
            comment: clean(self.comment),
            ..self
        })
    }
}

/// Precondition for a stock exit: the requested quantity must not exceed the
/// on-hand quantity. The store re-checks this inside the movement transaction;
/// this function is the rule itself.
pub fn check_exit(on_hand: i64, requested: i64) -> DomainResult<()> {
    if requested > on_hand {
        return Err(DomainError::insufficient_stock(on_hand, requested));
    }
    Ok(())
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_draft() -> EntryDraft {
        EntryDraft {
            article_id: ArticleId::new(1),
            quantity: 20,
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            supplier: Some("Horeca Supply".to_string()),
            total_price: 50.0,
            comment: None,
        }
    }

    fn exit_draft() -> ExitDraft {
        ExitDraft {
            article_id: ArticleId::new(1),
            quantity: 5,
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            reason: "Breakage".to_string(),
            actor: Some("marie".to_string()),
            comment: None,
        }
    }

    #[test]
    fn entry_draft_accepts_valid_input() {
        let d = entry_draft().normalized().unwrap();
        assert_eq!(d.quantity, 20);
        assert_eq!(d.supplier.as_deref(), Some("Horeca Supply"));
    }

    #[test]
    fn entry_draft_rejects_non_positive_quantity() {
        for quantity in [0, -3] {
            let d = EntryDraft {
                quantity,
                ..entry_draft()
            };
            let err = d.normalized().unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn entry_draft_rejects_negative_price() {
        let d = EntryDraft {
            total_price: -1.0,
            ..entry_draft()
        };
        assert!(d.normalized().is_err());
    }

    #[test]
    fn entry_draft_blanks_become_absent() {
        let d = EntryDraft {
            supplier: Some("   ".to_string()),
            comment: Some(String::new()),
            ..entry_draft()
        };
        let d = d.normalized().unwrap();
        assert_eq!(d.supplier, None);
        assert_eq!(d.comment, None);
    }

    #[test]
    fn exit_draft_requires_reason() {
        let d = ExitDraft {
            reason: "  ".to_string(),
            ..exit_draft()
        };
        let err = d.normalized().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn exit_draft_rejects_non_positive_quantity() {
        let d = ExitDraft {
            quantity: 0,
            ..exit_draft()
        };
        assert!(d.normalized().is_err());
    }

    #[test]
    fn check_exit_allows_up_to_on_hand() {
        assert!(check_exit(10, 10).is_ok());
        assert!(check_exit(10, 1).is_ok());
    }

    #[test]
    fn check_exit_rejects_oversized_request() {
        // Worked example: an article holding 25 rejects an exit of 30.
        let err = check_exit(25, 30).unwrap_err();
        let DomainError::InsufficientStock {
            available,
            requested,
        } = err
        else {
            panic!("expected InsufficientStock");
        };
        assert_eq!(available, 25);
        assert_eq!(requested, 30);
    }

    #[test]
    fn check_exit_rejects_any_request_when_exhausted() {
        assert!(check_exit(0, 1).is_err());
        assert!(check_exit(0, 0).is_ok());
    }
}
