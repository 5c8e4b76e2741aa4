//! # Sales Reports
//!
//! Revenue, transaction count and best seller over a reporting period.
//!
//! ## Periods
//! ```text
//! GET /api/report/hari-ini                       → ReportPeriod::Today
//! GET /api/report?start_date=..&end_date=..      → ReportPeriod::Range { start, end }
//! ```
//!
//! "Today" is whatever the store considers today. The SQLite ledger compares
//! against `date('now')` on the same clock that stamped `created_at`, so the
//! two never disagree about time zones.
//!
//! A range is inclusive on both ends and is not checked for `start <= end`:
//! a reversed range simply matches nothing and yields [`SalesSummary::empty`].

use std::future::Future;

use chrono::NaiveDate;

use crate::checkout::UnitOfWork;
use crate::money::Money;
use crate::types::{BestSeller, SalesSummary};
use crate::validation::{parse_report_date, ValidationResult};

// =============================================================================
// Report Period
// =============================================================================

/// Which transactions a summary covers, by creation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Created on the store's current calendar date.
    Today,
    /// Created on any date from `start` through `end`, inclusive.
    Range { start: NaiveDate, end: NaiveDate },
}

impl ReportPeriod {
    /// Builds a range period from already-parsed dates.
    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        ReportPeriod::Range { start, end }
    }

    /// Parses `start_date` / `end_date` query values (`YYYY-MM-DD`).
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::ReportPeriod;
    ///
    /// let period = ReportPeriod::range_from_params("2026-01-01", "2026-02-01").unwrap();
    /// assert!(matches!(period, ReportPeriod::Range { .. }));
    ///
    /// assert!(ReportPeriod::range_from_params("2026-01-01", "yesterday").is_err());
    /// ```
    pub fn range_from_params(start: &str, end: &str) -> ValidationResult<Self> {
        let start = parse_report_date("start_date", start)?;
        let end = parse_report_date("end_date", end)?;
        Ok(ReportPeriod::range(start, end))
    }

    /// Whether a transaction created on `date` falls in this period, given
    /// the store's notion of `today`.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match *self {
            ReportPeriod::Today => date == today,
            ReportPeriod::Range { start, end } => start <= date && date <= end,
        }
    }

    /// True for a range whose start is after its end.
    pub fn is_reversed(&self) -> bool {
        matches!(*self, ReportPeriod::Range { start, end } if start > end)
    }
}

// =============================================================================
// Ledger Capability
// =============================================================================

/// Revenue and count over a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RevenueTotals {
    pub total_revenue: Money,
    pub total_transactions: i64,
}

/// Read-only aggregate queries over committed transactions.
pub trait SalesLedger: UnitOfWork {
    /// Sum of `total_amount` and number of transactions in `period`.
    /// Zeros when nothing matches.
    fn query_summary(
        &mut self,
        period: &ReportPeriod,
    ) -> impl Future<Output = Result<RevenueTotals, Self::Error>> + Send;

    /// Product with the highest summed quantity in `period`, lowest product
    /// id first on ties. `None` when nothing matches.
    fn query_best_seller(
        &mut self,
        period: &ReportPeriod,
    ) -> impl Future<Output = Result<Option<BestSeller>, Self::Error>> + Send;
}

// =============================================================================
// Aggregator
// =============================================================================

/// Computes the [`SalesSummary`] for `period`.
///
/// Either both queries succeed and a full summary is returned, or the first
/// error is returned; there is no partially filled summary. A reversed range
/// is answered with [`SalesSummary::empty`] without touching the ledger.
pub async fn summarize_sales<L>(
    ledger: &mut L,
    period: &ReportPeriod,
) -> Result<SalesSummary, L::Error>
where
    L: SalesLedger,
{
    if period.is_reversed() {
        return Ok(SalesSummary::empty());
    }

    let totals = ledger.query_summary(period).await?;
    let best_seller = ledger.query_best_seller(period).await?;

    Ok(SalesSummary {
        total_revenue: totals.total_revenue,
        total_transactions: totals.total_transactions,
        best_seller,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{run_checkout, MemoryError, MemoryStore};
    use crate::types::CheckoutItem;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(product_id: i64, quantity: i64) -> CheckoutItem {
        CheckoutItem {
            product_id,
            quantity,
        }
    }

    #[test]
    fn test_period_contains() {
        let today = date(2026, 3, 10);
        assert!(ReportPeriod::Today.contains(today, today));
        assert!(!ReportPeriod::Today.contains(date(2026, 3, 9), today));

        let range = ReportPeriod::range(date(2026, 3, 1), date(2026, 3, 31));
        assert!(range.contains(date(2026, 3, 1), today));
        assert!(range.contains(date(2026, 3, 31), today));
        assert!(!range.contains(date(2026, 4, 1), today));
    }

    #[test]
    fn test_reversed_range_contains_nothing() {
        let reversed = ReportPeriod::range(date(2026, 3, 31), date(2026, 3, 1));
        assert!(reversed.is_reversed());
        assert!(!reversed.contains(date(2026, 3, 15), date(2026, 3, 15)));
    }

    #[test]
    fn test_range_from_params_rejects_bad_dates() {
        assert!(ReportPeriod::range_from_params("2026-01-01", "2026-01-31").is_ok());
        assert!(ReportPeriod::range_from_params("01-01-2026", "2026-01-31").is_err());
        assert!(ReportPeriod::range_from_params("2026-01-01", "").is_err());
    }

    #[tokio::test]
    async fn test_empty_store_today() {
        let mut store = MemoryStore::default();
        let summary = summarize_sales(&mut store, &ReportPeriod::Today).await.unwrap();
        assert_eq!(summary, SalesSummary::empty());
    }

    #[tokio::test]
    async fn test_summary_after_sales() {
        let mut store = MemoryStore::with_products(&[(1, "Kopi", 3500, 20), (2, "Teh", 4000, 15)]);
        run_checkout(&mut store, &[item(1, 2), item(2, 1)]).await.unwrap();
        run_checkout(&mut store, &[item(2, 4)]).await.unwrap();

        let summary = summarize_sales(&mut store, &ReportPeriod::Today).await.unwrap();
        assert_eq!(summary.total_revenue, Money::from_minor(11000 + 16000));
        assert_eq!(summary.total_transactions, 2);
        assert_eq!(
            summary.best_seller,
            Some(BestSeller {
                name: "Teh".to_string(),
                quantity_sold: 5
            })
        );
    }

    #[tokio::test]
    async fn test_best_seller_tie_prefers_lowest_id() {
        let mut store = MemoryStore::with_products(&[(1, "Kopi", 3500, 20), (2, "Teh", 4000, 15)]);
        run_checkout(&mut store, &[item(2, 3), item(1, 3)]).await.unwrap();

        let summary = summarize_sales(&mut store, &ReportPeriod::Today).await.unwrap();
        assert_eq!(summary.best_seller.map(|b| b.name), Some("Kopi".to_string()));
    }

    #[tokio::test]
    async fn test_best_seller_reports_latest_name() {
        let mut store = MemoryStore::with_products(&[(1, "Kopi", 3500, 20)]);
        run_checkout(&mut store, &[item(1, 2)]).await.unwrap();
        if let Some(product) = store.products.get_mut(&1) {
            product.name = "Es Kopi".to_string();
        }
        run_checkout(&mut store, &[item(1, 1)]).await.unwrap();

        let summary = summarize_sales(&mut store, &ReportPeriod::Today).await.unwrap();
        assert_eq!(
            summary.best_seller,
            Some(BestSeller {
                name: "Es Kopi".to_string(),
                quantity_sold: 3
            })
        );
    }

    #[tokio::test]
    async fn test_reversed_range_is_zero_summary() {
        let mut store = MemoryStore::with_products(&[(1, "Kopi", 3500, 20)]);
        run_checkout(&mut store, &[item(1, 1)]).await.unwrap();

        store.fail_queries = true;

        let today = store.today();
        let reversed = ReportPeriod::range(today.succ_opt().unwrap(), today.pred_opt().unwrap());
        let summary = summarize_sales(&mut store, &reversed).await.unwrap();
        assert_eq!(summary, SalesSummary::empty());

        assert_eq!(
            summarize_sales(&mut store, &ReportPeriod::Today).await,
            Err(MemoryError)
        );
    }
}
