use serde::Serialize;

use crate::error::AppError;
use crate::flows::Notice;
use crate::models::order::OrderView;
use crate::observability::metrics::Metrics;
use crate::remote::RemoteClient;

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TrackingOutcome {
    Found { order: Box<OrderView> },
    NotFound,
    Failed,
}

impl TrackingOutcome {
    fn label(&self) -> &'static str {
        match self {
            TrackingOutcome::Found { .. } => "found",
            TrackingOutcome::NotFound => "not_found",
            TrackingOutcome::Failed => "failed",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TrackingView {
    pub query: String,
    #[serde(flatten)]
    pub outcome: TrackingOutcome,
    pub notice: Notice,
}

pub async fn track(
    remote: &RemoteClient,
    metrics: &Metrics,
    query: &str,
) -> Result<TrackingView, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest(
            "enter an order number to search for".to_string(),
        ));
    }

    let (outcome, notice) = match remote.find_order(query).await {
        Ok(Some(order)) => (
            TrackingOutcome::Found {
                order: Box::new(OrderView::from(order)),
            },
            Notice::success("order found"),
        ),
        Ok(None) => (TrackingOutcome::NotFound, Notice::error("order not found")),
        Err(_) => (
            TrackingOutcome::Failed,
            Notice::error("order lookup failed, please try again"),
        ),
    };

    metrics
        .tracking_lookups_total
        .with_label_values(&[outcome.label()])
        .inc();

    Ok(TrackingView {
        query: query.to_string(),
        outcome,
        notice,
    })
}
