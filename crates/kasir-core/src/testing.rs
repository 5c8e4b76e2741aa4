//! In-memory store used by the engine and aggregator tests.
//!
//! Commit is emulated by running the engine against a clone and swapping it
//! in only on success, which is exactly what a dropped SQL transaction does.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::checkout::{checkout, CatalogAccessor, TransactionRecordStore, UnitOfWork};
use crate::error::CheckoutError;
use crate::money::Money;
use crate::report::{ReportPeriod, RevenueTotals, SalesLedger};
use crate::types::{
    BestSeller, CheckoutItem, PendingDetail, ProductForSale, Transaction, TransactionDetail,
    TransactionHeader,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("memory store unavailable")]
pub(crate) struct MemoryError;

#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    pub products: BTreeMap<i64, ProductForSale>,
    pub transactions: Vec<Transaction>,
    pub lookups: usize,
    pub fail_on_append: bool,
    pub fail_queries: bool,
    next_detail_id: i64,
}

impl MemoryStore {
    pub fn with_products(products: &[(i64, &str, i64, i64)]) -> Self {
        let mut store = MemoryStore::default();
        for &(id, name, price, stock) in products {
            store.products.insert(
                id,
                ProductForSale {
                    name: name.to_string(),
                    price: Money::from_minor(price),
                    stock,
                },
            );
        }
        store
    }

    pub fn stock(&self, id: i64) -> i64 {
        self.products[&id].stock
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    fn in_period<'a>(&'a self, period: &'a ReportPeriod) -> impl Iterator<Item = &'a Transaction> {
        let today = self.today();
        self.transactions
            .iter()
            .filter(move |t| period.contains(t.created_at.date_naive(), today))
    }
}

/// Runs a checkout and keeps its effects only if it succeeded.
pub(crate) async fn run_checkout(
    store: &mut MemoryStore,
    items: &[CheckoutItem],
) -> Result<Transaction, CheckoutError<MemoryError>> {
    let mut unit = store.clone();
    let result = checkout(&mut unit, items).await;
    if result.is_ok() {
        *store = unit;
    } else {
        store.lookups = unit.lookups;
    }
    result
}

impl UnitOfWork for MemoryStore {
    type Error = MemoryError;
}

impl CatalogAccessor for MemoryStore {
    async fn product_for_sale(
        &mut self,
        product_id: i64,
    ) -> Result<Option<ProductForSale>, MemoryError> {
        self.lookups += 1;
        Ok(self.products.get(&product_id).cloned())
    }

    async fn decrement_stock(
        &mut self,
        product_id: i64,
        quantity: i64,
    ) -> Result<bool, MemoryError> {
        match self.products.get_mut(&product_id) {
            Some(product) if product.stock >= quantity => {
                product.stock -= quantity;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl TransactionRecordStore for MemoryStore {
    async fn create_transaction(
        &mut self,
        total_amount: Money,
    ) -> Result<TransactionHeader, MemoryError> {
        let header = TransactionHeader {
            id: self.transactions.len() as i64 + 1,
            created_at: Utc::now(),
        };
        self.transactions.push(Transaction {
            id: header.id,
            total_amount,
            created_at: header.created_at,
            details: Vec::new(),
        });
        Ok(header)
    }

    async fn append_detail(
        &mut self,
        transaction_id: i64,
        detail: &PendingDetail,
    ) -> Result<i64, MemoryError> {
        if self.fail_on_append {
            return Err(MemoryError);
        }
        self.next_detail_id += 1;
        let id = self.next_detail_id;
        let tx = self
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction_id)
            .ok_or(MemoryError)?;
        tx.details.push(TransactionDetail {
            id,
            transaction_id,
            product_id: detail.product_id,
            product_name: detail.product_name.clone(),
            quantity: detail.quantity,
            subtotal: detail.subtotal,
        });
        Ok(id)
    }
}

impl SalesLedger for MemoryStore {
    async fn query_summary(
        &mut self,
        period: &ReportPeriod,
    ) -> Result<RevenueTotals, MemoryError> {
        if self.fail_queries {
            return Err(MemoryError);
        }
        let mut totals = RevenueTotals::default();
        for tx in self.in_period(period) {
            totals.total_revenue += tx.total_amount;
            totals.total_transactions += 1;
        }
        Ok(totals)
    }

    async fn query_best_seller(
        &mut self,
        period: &ReportPeriod,
    ) -> Result<Option<BestSeller>, MemoryError> {
        if self.fail_queries {
            return Err(MemoryError);
        }

        // Details are in creation order, so the last name seen is the newest.
        let mut sold: BTreeMap<i64, (String, i64)> = BTreeMap::new();
        for detail in self.in_period(period).flat_map(|t| &t.details) {
            let entry = sold.entry(detail.product_id).or_default();
            entry.0.clone_from(&detail.product_name);
            entry.1 += detail.quantity;
        }

        // Highest quantity, then lowest id.
        Ok(sold
            .into_iter()
            .max_by_key(|(id, (_, qty))| (*qty, std::cmp::Reverse(*id)))
            .map(|(_, (name, quantity_sold))| BestSeller {
                name,
                quantity_sold,
            }))
    }
}
