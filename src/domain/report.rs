//! Merchant sales summaries, bucketed by day, ISO week or month.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{domain::merchant_order::MerchantOrderStatus, money::Money};

const TOP_ITEMS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    fn bucket(self, at: DateTime<Utc>) -> String {
        match self {
            Timeframe::Daily => at.format("%Y-%m-%d").to_string(),
            Timeframe::Weekly => {
                let week = at.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            Timeframe::Monthly => at.format("%Y-%m").to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SalesLine {
    pub name: String,
    pub quantity: u32,
    pub price: Money,
}

#[derive(Debug, Clone)]
pub struct ReportOrder {
    pub created_at: DateTime<Utc>,
    pub status: MerchantOrderStatus,
    pub total: Money,
    pub lines: Vec<SalesLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    pub name: String,
    pub quantity: u32,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub period: String,
    pub total_sales: Money,
    pub order_count: u32,
    pub average_order_value: Money,
    pub top_items: Vec<TopItem>,
}

#[derive(Default)]
struct Bucket {
    total: Money,
    orders: u32,
    items: HashMap<String, (u32, Money)>,
}

/// Cancelled orders are left out. Periods come back most recent first.
pub fn build_sales_report(orders: &[ReportOrder], timeframe: Timeframe) -> Vec<SalesReport> {
    let mut buckets: BTreeMap<String, Bucket> = BTreeMap::new();

    for order in orders
        .iter()
        .filter(|order| order.status != MerchantOrderStatus::Cancelled)
    {
        let bucket = buckets.entry(timeframe.bucket(order.created_at)).or_default();
        bucket.total += order.total;
        bucket.orders += 1;
        for line in &order.lines {
            let entry = bucket
                .items
                .entry(line.name.clone())
                .or_insert((0, Money::ZERO));
            entry.0 += line.quantity;
            entry.1 += line.price * line.quantity;
        }
    }

    buckets
        .into_iter()
        .rev()
        .map(|(period, bucket)| {
            let mut top_items: Vec<TopItem> = bucket
                .items
                .into_iter()
                .map(|(name, (quantity, revenue))| TopItem {
                    name,
                    quantity,
                    revenue,
                })
                .collect();
            top_items.sort_by(|a, b| {
                b.quantity
                    .cmp(&a.quantity)
                    .then(b.revenue.cmp(&a.revenue))
                    .then(a.name.cmp(&b.name))
            });
            top_items.truncate(TOP_ITEMS);

            let average = if bucket.orders == 0 {
                Money::ZERO
            } else {
                Money::from_centavos(bucket.total.centavos() / i64::from(bucket.orders))
            };

            SalesReport {
                period,
                total_sales: bucket.total,
                order_count: bucket.orders,
                average_order_value: average,
                top_items,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order(day: u32, status: MerchantOrderStatus, lines: &[(&str, u32, i64)]) -> ReportOrder {
        let lines: Vec<SalesLine> = lines
            .iter()
            .map(|(name, quantity, pesos)| SalesLine {
                name: name.to_string(),
                quantity: *quantity,
                price: Money::from_pesos(*pesos),
            })
            .collect();
        ReportOrder {
            created_at: Utc.with_ymd_and_hms(2024, 4, day, 10, 30, 0).unwrap(),
            status,
            total: lines.iter().map(|l| l.price * l.quantity).sum(),
            lines,
        }
    }

    #[test]
    fn daily_buckets_skip_cancelled_orders() {
        let orders = vec![
            order(18, MerchantOrderStatus::Delivered, &[("Chicken Joy", 2, 99), ("Jolly Spaghetti", 1, 75)]),
            order(18, MerchantOrderStatus::Pending, &[("Burger Steak", 1, 89)]),
            order(18, MerchantOrderStatus::Cancelled, &[("Chicken Joy", 10, 99)]),
            order(17, MerchantOrderStatus::Delivered, &[("Chicken Joy", 1, 99)]),
        ];

        let report = build_sales_report(&orders, Timeframe::Daily);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].period, "2024-04-18");
        assert_eq!(report[0].order_count, 2);
        assert_eq!(report[0].total_sales, Money::from_pesos(362));
        assert_eq!(report[0].average_order_value, Money::from_pesos(181));
        assert_eq!(report[0].top_items[0].name, "Chicken Joy");
        assert_eq!(report[0].top_items[0].revenue, Money::from_pesos(198));
    }

    #[test]
    fn monthly_groups_everything_together() {
        let orders = vec![
            order(1, MerchantOrderStatus::Delivered, &[("A", 1, 10)]),
            order(30, MerchantOrderStatus::Ready, &[("B", 1, 20)]),
        ];
        let report = build_sales_report(&orders, Timeframe::Monthly);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].period, "2024-04");
        assert_eq!(report[0].average_order_value, Money::from_pesos(15));
    }
}
