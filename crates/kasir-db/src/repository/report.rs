//! # Report Queries
//!
//! SQL behind [`SalesLedger`]: a [`DateFilter`] turns a [`ReportPeriod`] into
//! a predicate on the transaction's creation date, shared by the summary and
//! best-seller queries.
//!
//! ```text
//! ReportPeriod::Today              → date(t.created_at) = date('now')
//! ReportPeriod::Range{start, end}  → date(t.created_at) BETWEEN ?1 AND ?2
//! ```

use kasir_core::{BestSeller, ReportPeriod, RevenueTotals, SalesLedger, REPORT_DATE_FORMAT};

use super::checkout::SqliteUnitOfWork;
use crate::error::DbResult;

/// Creation-date predicate over the `transactions t` alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFilter {
    clause: &'static str,
    params: Vec<String>,
}

impl DateFilter {
    /// Builds the predicate and its bind values for `period`.
    pub fn for_period(period: &ReportPeriod) -> Self {
        match period {
            ReportPeriod::Today => DateFilter {
                clause: "date(t.created_at) = date('now')",
                params: Vec::new(),
            },
            ReportPeriod::Range { start, end } => DateFilter {
                clause: "date(t.created_at) BETWEEN ?1 AND ?2",
                params: vec![
                    start.format(REPORT_DATE_FORMAT).to_string(),
                    end.format(REPORT_DATE_FORMAT).to_string(),
                ],
            },
        }
    }

    pub fn clause(&self) -> &'static str {
        self.clause
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    fn summary_sql(&self) -> String {
        format!(
            r#"
            SELECT
                COALESCE(SUM(t.total_amount), 0) AS total_revenue,
                COUNT(*) AS total_transactions
            FROM transactions t
            WHERE {}
            "#,
            self.clause
        )
    }

    /// Name comes from the product's newest detail in the window, so a
    /// product renamed between sales reports under its latest name.
    fn best_seller_sql(&self) -> String {
        format!(
            r#"
            SELECT
                latest.product_name AS name,
                sold.quantity_sold
            FROM (
                SELECT
                    td.product_id,
                    SUM(td.quantity) AS quantity_sold,
                    MAX(td.id) AS last_detail_id
                FROM transaction_details td
                JOIN transactions t ON td.transaction_id = t.id
                WHERE {}
                GROUP BY td.product_id
            ) sold
            JOIN transaction_details latest ON latest.id = sold.last_detail_id
            ORDER BY sold.quantity_sold DESC, sold.product_id ASC
            LIMIT 1
            "#,
            self.clause
        )
    }
}

impl SalesLedger for SqliteUnitOfWork {
    async fn query_summary(&mut self, period: &ReportPeriod) -> DbResult<RevenueTotals> {
        let filter = DateFilter::for_period(period);
        let sql = filter.summary_sql();

        let mut query = sqlx::query_as::<_, RevenueTotals>(&sql);
        for param in filter.params() {
            query = query.bind(param.as_str());
        }

        Ok(query.fetch_one(self.conn()).await?)
    }

    async fn query_best_seller(&mut self, period: &ReportPeriod) -> DbResult<Option<BestSeller>> {
        let filter = DateFilter::for_period(period);
        let sql = filter.best_seller_sql();

        let mut query = sqlx::query_as::<_, BestSeller>(&sql);
        for param in filter.params() {
            query = query.bind(param.as_str());
        }

        Ok(query.fetch_optional(self.conn()).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_today_filter_has_no_params() {
        let filter = DateFilter::for_period(&ReportPeriod::Today);
        assert_eq!(filter.clause(), "date(t.created_at) = date('now')");
        assert!(filter.params().is_empty());
    }

    #[test]
    fn test_range_filter_binds_iso_dates() {
        let period = ReportPeriod::range(
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        );
        let filter = DateFilter::for_period(&period);

        assert!(filter.clause().contains("BETWEEN ?1 AND ?2"));
        assert_eq!(filter.params(), ["2026-01-05", "2026-02-01"]);
    }
}
