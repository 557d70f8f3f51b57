//! House points as a ledger of signed transactions.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::error::AppError;
use crate::models::{House, PointTransaction};
use crate::storage::{lock, Store};

pub const RECENT_LIMIT: usize = 10;

/// Result of a successful award or deduction.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub house: House,
    pub transaction: PointTransaction,
    pub total: i64,
}

/// A transaction joined with its house name, for listings.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionView {
    pub id: u64,
    pub house_id: u64,
    pub house_name: String,
    pub points_change: i64,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

/// Points per house id. Houses without transactions are absent.
///
/// Sums saturate so a ledger written by an older build can still be read.
pub fn totals(transactions: &[PointTransaction]) -> HashMap<u64, i64> {
    let mut totals = HashMap::new();
    for tx in transactions {
        let total: &mut i64 = totals.entry(tx.house_id).or_insert(0);
        *total = total.saturating_add(tx.points_change);
    }
    totals
}

fn house_total(transactions: &[PointTransaction], house_id: u64) -> i64 {
    transactions
        .iter()
        .filter(|tx| tx.house_id == house_id)
        .fold(0_i64, |acc, tx| acc.saturating_add(tx.points_change))
}

pub fn points_for(store: &Store, house_id: u64) -> Result<i64, AppError> {
    let txs = lock(&store.transactions, "point transactions")?;
    Ok(house_total(txs.rows(), house_id))
}

pub fn award(store: &Store, house_id: u64, points: i64, reason: &str) -> Result<LedgerEntry, AppError> {
    validate(points, reason)?;
    record(store, house_id, points, reason.trim())
}

pub fn deduct(store: &Store, house_id: u64, points: i64, reason: &str) -> Result<LedgerEntry, AppError> {
    validate(points, reason)?;
    record(store, house_id, -points, reason.trim())
}

/// Newest first, at most `limit` rows.
pub fn recent(store: &Store, limit: usize) -> Result<Vec<TransactionView>, AppError> {
    let houses = lock(&store.houses, "houses")?;
    let txs = lock(&store.transactions, "point transactions")?;

    let mut rows: Vec<&PointTransaction> = txs.rows().iter().collect();
    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
    Ok(rows
        .into_iter()
        .take(limit)
        .map(|tx| TransactionView {
            id: tx.id,
            house_id: tx.house_id,
            house_name: houses
                .get(tx.house_id)
                .map_or_else(|| format!("#{}", tx.house_id), |h| h.name.clone()),
            points_change: tx.points_change,
            reason: tx.reason.clone(),
            timestamp: tx.timestamp,
        })
        .collect())
}

fn validate(points: i64, reason: &str) -> Result<(), AppError> {
    if points <= 0 {
        return Err(AppError::ValidationError("Points must be a positive integer".to_string()));
    }
    if reason.trim().is_empty() {
        return Err(AppError::ValidationError("Reason cannot be empty".to_string()));
    }
    Ok(())
}

fn record(store: &Store, house_id: u64, delta: i64, reason: &str) -> Result<LedgerEntry, AppError> {
    let houses = lock(&store.houses, "houses")?;
    let house = houses
        .get(house_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("House {} does not exist", house_id)))?;

    let mut txs = lock(&store.transactions, "point transactions")?;
    let total = house_total(txs.rows(), house_id)
        .checked_add(delta)
        .ok_or_else(|| {
            AppError::ValidationError(format!("Points change would overflow the total of {}", house.name))
        })?;
    let transaction = txs.insert(|id| PointTransaction {
        id,
        house_id,
        points_change: delta,
        reason: reason.to_string(),
        timestamp: Utc::now(),
    })?;

    tracing::info!(house = %house.name, delta, total, "points recorded");
    Ok(LedgerEntry { house, transaction, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_house(dir: &std::path::Path) -> Store {
        let store = Store::open_or_create(dir).unwrap();
        lock(&store.houses, "houses")
            .unwrap()
            .insert(|id| House {
                id,
                name: "An-Nahl".to_string(),
                description: None,
                logo_url: None,
            })
            .unwrap();
        store
    }

    #[test]
    fn award_and_deduct_adjust_total() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_house(dir.path());

        assert_eq!(award(&store, 1, 10, "Cleanest dorm").unwrap().total, 10);
        let entry = deduct(&store, 1, 3, "  Late to assembly ").unwrap();
        assert_eq!(entry.total, 7);
        assert_eq!(entry.transaction.points_change, -3);
        assert_eq!(entry.transaction.reason, "Late to assembly");
        assert_eq!(points_for(&store, 1).unwrap(), 7);
    }

    #[test]
    fn deductions_may_go_negative() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_house(dir.path());
        assert_eq!(deduct(&store, 1, 5, "Uniform").unwrap().total, -5);
    }

    #[test]
    fn rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_house(dir.path());

        assert!(matches!(award(&store, 1, 0, "x"), Err(AppError::ValidationError(_))));
        assert!(matches!(deduct(&store, 1, -2, "x"), Err(AppError::ValidationError(_))));
        assert!(matches!(award(&store, 1, 5, "   "), Err(AppError::ValidationError(_))));
        assert!(matches!(award(&store, 9, 5, "x"), Err(AppError::NotFound(_))));
        assert_eq!(store.counts().unwrap().transactions, 0);
    }

    #[test]
    fn overflowing_award_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_house(dir.path());

        assert_eq!(award(&store, 1, i64::MAX, "big").unwrap().total, i64::MAX);
        assert!(matches!(award(&store, 1, 1, "one"), Err(AppError::ValidationError(_))));
        assert_eq!(store.counts().unwrap().transactions, 1);
        assert_eq!(points_for(&store, 1).unwrap(), i64::MAX);

        // the store keeps working after the rejection
        assert_eq!(deduct(&store, 1, 1, "fix").unwrap().total, i64::MAX - 1);
    }

    #[test]
    fn totals_saturate_on_a_corrupt_ledger() {
        let now = Utc::now();
        let tx = |id, points_change| PointTransaction {
            id,
            house_id: 1,
            points_change,
            reason: "x".to_string(),
            timestamp: now,
        };
        let txs = [tx(1, i64::MAX), tx(2, 5)];
        assert_eq!(totals(&txs).get(&1), Some(&i64::MAX));
        assert_eq!(house_total(&txs, 1), i64::MAX);
    }

    #[test]
    fn recent_lists_newest_first_with_limit() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_house(dir.path());
        for n in 1..=12 {
            award(&store, 1, n, &format!("round {n}")).unwrap();
        }

        let rows = recent(&store, RECENT_LIMIT).unwrap();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].reason, "round 12");
        assert_eq!(rows[0].house_name, "An-Nahl");
        assert_eq!(rows[9].reason, "round 3");
    }

    #[test]
    fn totals_group_by_house() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_house(dir.path());
        award(&store, 1, 4, "a").unwrap();
        award(&store, 1, 6, "b").unwrap();

        let txs = lock(&store.transactions, "point transactions").unwrap();
        let totals = totals(txs.rows());
        assert_eq!(totals.get(&1), Some(&10));
        assert_eq!(totals.get(&2), None);
    }
}
