use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::decimal;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    #[default]
    Home,
    Pickup,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Courier,
    Transit,
    Ready,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Processing,
        OrderStatus::Courier,
        OrderStatus::Transit,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    pub fn key(self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Courier => "courier",
            OrderStatus::Transit => "transit",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Processing => "Order is being processed",
            OrderStatus::Courier => "Order is with the courier",
            OrderStatus::Transit => "Order is in transit",
            OrderStatus::Ready => "Order is ready for pickup",
            OrderStatus::Delivered => "Order delivered",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            OrderStatus::Processing => "yellow",
            OrderStatus::Courier => "blue",
            OrderStatus::Transit => "purple",
            OrderStatus::Ready => "green",
            OrderStatus::Delivered => "gray",
        }
    }

    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|status| *status == self)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub recipient_name: String,
    pub recipient_phone: String,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(deserialize_with = "decimal::required")]
    pub weight: f64,
    #[serde(default, deserialize_with = "decimal::optional")]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "decimal::optional")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "decimal::optional")]
    pub height: Option<f64>,
    #[serde(deserialize_with = "decimal::required")]
    pub price: f64,
    pub delivery_type: DeliveryType,
    #[serde(default)]
    pub comment: Option<String>,
    pub status: OrderStatus,
    pub created_at: String,
    #[serde(default)]
    pub pickup_point_id: Option<i64>,
    #[serde(default)]
    pub delivery_point_id: Option<i64>,
    #[serde(default)]
    pub qr_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub user_id: Option<i64>,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub delivery_address: String,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub delivery_type: DeliveryType,
    pub comment: String,
    pub pickup_point_id: Option<i64>,
    pub delivery_point_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusStep {
    pub status: OrderStatus,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub status_label: &'static str,
    pub status_color: &'static str,
    pub created_on: String,
    pub progress: Vec<StatusStep>,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        let current = order.status.position();
        let progress = OrderStatus::ALL
            .iter()
            .enumerate()
            .map(|(idx, status)| StatusStep {
                status: *status,
                label: status.label(),
                active: idx <= current,
            })
            .collect();

        Self {
            status_label: order.status.label(),
            status_color: order.status.color(),
            created_on: display_date(&order.created_at),
            progress,
            order,
        }
    }
}

pub fn display_date(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.format("%d.%m.%Y").to_string();
    }

    for pattern in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return parsed.format("%d.%m.%Y").to_string();
        }
    }

    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{display_date, Order, OrderStatus, OrderView};

    fn order_json(status: &str) -> serde_json::Value {
        json!({
            "id": 7,
            "order_number": "BB-007",
            "recipient_name": "Ivan Petrov",
            "recipient_phone": "+7 918 123 45 67",
            "delivery_address": "Sukhum, Lenina 15",
            "weight": "5.00",
            "price": 600,
            "delivery_type": "home",
            "status": status,
            "created_at": "2026-01-10 14:03:11.512000"
        })
    }

    #[test]
    fn decodes_decimal_strings_and_timestamps() {
        let order: Order = serde_json::from_value(order_json("transit")).unwrap();

        assert_eq!(order.weight, 5.0);
        assert_eq!(order.price, 600.0);
        assert_eq!(order.status, OrderStatus::Transit);
        assert!(order.qr_code.is_none());
    }

    #[test]
    fn progress_marks_every_step_up_to_current_status() {
        let order: Order = serde_json::from_value(order_json("transit")).unwrap();
        let view = OrderView::from(order);

        let active: Vec<bool> = view.progress.iter().map(|step| step.active).collect();
        assert_eq!(active, vec![true, true, true, false, false]);
        assert_eq!(view.status_label, "Order is in transit");
        assert_eq!(view.created_on, "10.01.2026");
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = serde_json::from_value::<Order>(order_json("lost"));
        assert!(result.is_err());
    }

    #[test]
    fn display_date_accepts_common_shapes() {
        assert_eq!(display_date("2026-01-10T08:00:00Z"), "10.01.2026");
        assert_eq!(display_date("2026-01-10"), "10.01.2026");
        assert_eq!(display_date("yesterday"), "yesterday");
    }

    #[test]
    fn status_keys_round_trip_through_lookup() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from_key(status.key()), Some(status));
        }
        assert_eq!(OrderStatus::from_key("lost"), None);
    }
}
