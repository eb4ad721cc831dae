use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A placed order. Line items live in a JSONB document column so the order
/// captures product name and unit price as they were at purchase time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,
    pub client_id: Uuid,
    pub items: sqlx::types::Json<Vec<OrderItem>>,
    pub shipping: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Read-only price breakdown shown on the payment page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: Uuid,
    pub lines: Vec<SummaryLine>,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl OrderSummary {
    /// Subtotal is the sum of line totals; total adds flat shipping.
    pub fn from_order(order: &Order) -> Self {
        let lines: Vec<SummaryLine> = order
            .items
            .iter()
            .map(|item| SummaryLine {
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.line_total(),
            })
            .collect();

        let subtotal: Decimal = lines.iter().map(|l| l.line_total).sum();
        let total = subtotal + order.shipping;

        Self {
            order_id: order.id,
            lines,
            subtotal,
            shipping: order.shipping,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn order_with(items: Vec<OrderItem>, shipping: &str) -> Order {
        Order {
            id: Uuid::nil(),
            client_id: Uuid::nil(),
            items: sqlx::types::Json(items),
            shipping: shipping.parse().unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summary_totals_add_up() {
        let order = order_with(
            vec![
                OrderItem {
                    product_id: Uuid::nil(),
                    name: "Dried lavender bouquet".into(),
                    quantity: 3,
                    unit_price: dec("10.00"),
                },
                OrderItem {
                    product_id: Uuid::nil(),
                    name: "Simple home frame".into(),
                    quantity: 2,
                    unit_price: dec("34.00"),
                },
            ],
            "10.00",
        );

        let summary = OrderSummary::from_order(&order);
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].line_total, dec("30.00"));
        assert_eq!(summary.lines[1].line_total, dec("68.00"));
        assert_eq!(summary.subtotal, dec("98.00"));
        assert_eq!(summary.total, dec("108.00"));
    }

    #[test]
    fn summary_of_empty_order_is_shipping_only() {
        let order = order_with(vec![], "10.00");
        let summary = OrderSummary::from_order(&order);
        assert!(summary.lines.is_empty());
        assert_eq!(summary.subtotal, Decimal::ZERO);
        assert_eq!(summary.total, dec("10.00"));
    }
}
