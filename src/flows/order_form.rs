use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::flows::Notice;
use crate::models::decimal;
use crate::models::order::{DeliveryType, NewOrder, OrderView};
use crate::observability::metrics::Metrics;
use crate::pricing::{self, Dimensions, Quote};
use crate::remote::{RemoteClient, RemoteError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderForm {
    pub recipient_name: String,
    pub recipient_phone: String,
    pub delivery_address: String,
    #[serde(deserialize_with = "decimal::optional")]
    pub weight: Option<f64>,
    #[serde(deserialize_with = "decimal::optional")]
    pub length: Option<f64>,
    #[serde(deserialize_with = "decimal::optional")]
    pub width: Option<f64>,
    #[serde(deserialize_with = "decimal::optional")]
    pub height: Option<f64>,
    pub delivery_type: DeliveryType,
    pub comment: String,
    pub pickup_point_id: Option<i64>,
    pub delivery_point_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormError {
    pub missing: Vec<&'static str>,
}

impl FormError {
    pub fn message(&self) -> &'static str {
        if self.missing == ["delivery_point_id"] {
            "choose a delivery point"
        } else {
            "fill in all required fields"
        }
    }
}

impl OrderForm {
    pub fn dimensions(&self) -> Option<Dimensions> {
        Dimensions::from_parts(self.length, self.width, self.height)
    }

    pub fn validate(&self, user_id: Option<i64>) -> Result<NewOrder, FormError> {
        let mut missing = Vec::new();

        if self.recipient_name.trim().is_empty() {
            missing.push("recipient_name");
        }
        if self.recipient_phone.trim().is_empty() {
            missing.push("recipient_phone");
        }
        if self.weight.is_none() {
            missing.push("weight");
        }
        if self.delivery_type == DeliveryType::Pickup && self.delivery_point_id.is_none() {
            missing.push("delivery_point_id");
        }

        let weight = match self.weight {
            Some(weight) if missing.is_empty() => weight,
            _ => return Err(FormError { missing }),
        };

        Ok(NewOrder {
            user_id,
            recipient_name: self.recipient_name.trim().to_string(),
            recipient_phone: self.recipient_phone.trim().to_string(),
            delivery_address: self.delivery_address.trim().to_string(),
            weight,
            length: self.length,
            width: self.width,
            height: self.height,
            delivery_type: self.delivery_type,
            comment: self.comment.trim().to_string(),
            pickup_point_id: self.pickup_point_id,
            delivery_point_id: self.delivery_point_id,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct OrderCreated {
    pub order: OrderView,
    pub qr_code: Option<String>,
    pub quote: Quote,
    pub notice: Notice,
}

#[derive(Debug)]
pub enum SubmitError {
    Invalid(FormError),
    Rejected { error: RemoteError, form: OrderForm },
}

pub async fn submit(
    remote: &RemoteClient,
    metrics: &Metrics,
    form: OrderForm,
    user_id: Option<i64>,
) -> Result<OrderCreated, SubmitError> {
    let new_order = form.validate(user_id).map_err(SubmitError::Invalid)?;
    let quote = pricing::quote(new_order.weight, form.dimensions().as_ref());

    let order = match remote.create_order(&new_order).await {
        Ok(order) => order,
        Err(error) => return Err(SubmitError::Rejected { error, form }),
    };

    metrics.orders_created_total.inc();
    info!(order_number = %order.order_number, price = order.price, "order created");

    let qr_code = match remote.generate_qr(&order.order_number).await {
        Ok(qr) => Some(qr.qr_code),
        Err(err) => {
            warn!(order_number = %order.order_number, error = %err, "qr generation failed");
            order.qr_code.clone()
        }
    };

    let notice = Notice::success(format!("order {} created", order.order_number));

    Ok(OrderCreated {
        order: OrderView::from(order),
        qr_code,
        quote,
        notice,
    })
}
