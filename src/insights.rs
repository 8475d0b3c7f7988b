//! Spending summaries for the insights dashboard.

use crate::transactions::TransactionRecord;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

/// Outflow attributed to one category tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub tag: String,
    /// Magnitude of spending, always positive.
    pub outflow_minor: i64,
    /// Whole percent of total outflow.
    pub percent: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpendingSummary {
    pub income_minor: i64,
    /// Magnitude of all spending.
    pub expenses_minor: i64,
    pub net_minor: i64,
    /// Largest category first. Percentages add up to exactly 100 whenever
    /// there is any spending.
    pub breakdown: Vec<CategoryShare>,
}

impl SpendingSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        let mut income_minor = 0i64;
        let mut expenses_minor = 0i64;
        let mut by_tag: BTreeMap<&str, i64> = BTreeMap::new();

        for record in records {
            if record.is_income() {
                income_minor = income_minor.saturating_add(record.amount_minor);
            } else if record.is_expense() {
                let outflow = record.amount_minor.saturating_abs();
                expenses_minor = expenses_minor.saturating_add(outflow);
                let slot = by_tag.entry(record.category_tag.as_str()).or_default();
                *slot = slot.saturating_add(outflow);
            }
        }

        Self {
            income_minor,
            expenses_minor,
            net_minor: income_minor.saturating_sub(expenses_minor),
            breakdown: apportion(by_tag),
        }
    }

    /// Summary over records with `from <= timestamp < to`.
    pub fn for_period(records: &[TransactionRecord], from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self::from_records(
            records
                .iter()
                .filter(|r| r.timestamp >= from && r.timestamp < to),
        )
    }

    pub fn share_of(&self, tag: &str) -> Option<u8> {
        self.breakdown
            .iter()
            .find(|share| share.tag == tag)
            .map(|share| share.percent)
    }
}

/// Largest-remainder rounding of each tag's share of the total.
fn apportion(by_tag: BTreeMap<&str, i64>) -> Vec<CategoryShare> {
    let total: i128 = by_tag.values().map(|v| i128::from(*v)).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut rows: Vec<(CategoryShare, i128)> = by_tag
        .into_iter()
        .map(|(tag, outflow)| {
            let scaled = i128::from(outflow) * 100;
            let share = CategoryShare {
                tag: tag.to_string(),
                outflow_minor: outflow,
                percent: (scaled / total) as u8,
            };
            (share, scaled % total)
        })
        .collect();

    let assigned: u32 = rows.iter().map(|(share, _)| u32::from(share.percent)).sum();
    let mut leftover = 100u32.saturating_sub(assigned) as usize;

    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| rows[b].1.cmp(&rows[a].1).then(rows[a].0.tag.cmp(&rows[b].0.tag)));
    for index in order {
        if leftover == 0 {
            break;
        }
        rows[index].0.percent += 1;
        leftover -= 1;
    }

    let mut breakdown: Vec<CategoryShare> = rows.into_iter().map(|(share, _)| share).collect();
    breakdown.sort_by(|a, b| {
        b.outflow_minor
            .cmp(&a.outflow_minor)
            .then_with(|| a.tag.cmp(&b.tag))
    });
    breakdown
}

/// Change from `previous` to `current` in whole percent, rounded half away
/// from zero. `None` when there is nothing to compare against.
///
/// ```rust
/// use smartmoney::insights::percent_change;
///
/// assert_eq!(percent_change(20_000, 17_000), Some(-15));
/// assert_eq!(percent_change(0, 5_000), None);
/// ```
pub fn percent_change(previous: i64, current: i64) -> Option<i64> {
    if previous == 0 {
        return None;
    }
    let delta = Decimal::from(current).checked_sub(Decimal::from(previous))?;
    let base = Decimal::from(previous.unsigned_abs());
    delta
        .checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(base)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::SUBSCRIPTIONS_TAG;
    use chrono::TimeZone;

    fn rec(amount_minor: i64, tag: &str, day: u32) -> TransactionRecord {
        TransactionRecord {
            label: format!("{tag} {amount_minor}"),
            subtitle: None,
            amount_minor,
            timestamp: Utc.with_ymd_and_hms(2023, 10, day, 12, 0, 0).unwrap(),
            category_tag: tag.into(),
        }
    }

    #[test]
    fn totals_and_net() {
        let records = vec![
            rec(15_000_000, "income", 28),
            rec(-120_000, "food", 28),
            rec(-450_000, SUBSCRIPTIONS_TAG, 27),
        ];

        let summary = SpendingSummary::from_records(&records);

        assert_eq!(summary.income_minor, 15_000_000);
        assert_eq!(summary.expenses_minor, 570_000);
        assert_eq!(summary.net_minor, 14_430_000);
        assert_eq!(summary.breakdown[0].tag, SUBSCRIPTIONS_TAG);
        assert_eq!(summary.share_of("income"), None);
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let records = vec![rec(-1, "a", 1), rec(-1, "b", 1), rec(-1, "c", 1)];

        let summary = SpendingSummary::from_records(&records);
        let total: u32 = summary.breakdown.iter().map(|s| u32::from(s.percent)).sum();

        assert_eq!(total, 100);
        assert_eq!(summary.share_of("a"), Some(34));
        assert_eq!(summary.share_of("c"), Some(33));
    }

    #[test]
    fn no_spending_means_no_breakdown() {
        let summary = SpendingSummary::from_records(&[rec(500, "income", 1)]);

        assert!(summary.breakdown.is_empty());
        assert_eq!(summary.expenses_minor, 0);
    }

    #[test]
    fn period_is_half_open() {
        let records = vec![rec(-100, "food", 26), rec(-200, "food", 27), rec(-400, "food", 28)];
        let from = Utc.with_ymd_and_hms(2023, 10, 26, 12, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2023, 10, 28, 12, 0, 0).unwrap();

        let summary = SpendingSummary::for_period(&records, from, to);

        assert_eq!(summary.expenses_minor, 300);
    }

    #[test]
    fn percent_change_rounds_half_away_from_zero() {
        assert_eq!(percent_change(100, 122), Some(22));
        assert_eq!(percent_change(200, 201), Some(1));
        assert_eq!(percent_change(200, 199), Some(-1));
        assert_eq!(percent_change(-100, -50), Some(50));
    }
}
