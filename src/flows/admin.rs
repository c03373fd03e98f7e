use std::future::Future;

use serde::Serialize;
use tracing::{error, info};

use crate::error::AppError;
use crate::flows::Notice;
use crate::models::content::{
    FaqItem, FaqUpdate, NewFaqItem, NewStatusDefinition, Settings, StatusDefinition,
};
use crate::models::order::{Order, OrderStatus};
use crate::models::point::{DeliveryPoint, NewDeliveryPoint, NewPickupPoint, PickupPoint};
use crate::remote::{RemoteClient, RemoteError};

#[derive(Debug, Clone, Serialize)]
pub struct StatusEntry {
    #[serde(flatten)]
    pub definition: StatusDefinition,
    pub known: bool,
}

impl From<StatusDefinition> for StatusEntry {
    fn from(definition: StatusDefinition) -> Self {
        Self {
            known: definition.matches_order_status(),
            definition,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminSnapshot {
    pub faq: Vec<FaqItem>,
    pub pickup_points: Vec<PickupPoint>,
    pub delivery_points: Vec<DeliveryPoint>,
    pub settings: Settings,
    pub statuses: Vec<StatusEntry>,
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub struct AdminView {
    pub notice: Notice,
    pub snapshot: Option<AdminSnapshot>,
}

pub async fn load_snapshot(remote: &RemoteClient) -> Result<AdminSnapshot, RemoteError> {
    let (faq, pickup_points, delivery_points, settings, statuses, orders) = futures::try_join!(
        remote.list_faq(),
        remote.list_pickup_points(),
        remote.list_delivery_points(),
        remote.get_settings(),
        remote.list_statuses(),
        remote.list_orders(None),
    )?;

    Ok(AdminSnapshot {
        faq,
        pickup_points,
        delivery_points,
        settings,
        statuses: statuses.into_iter().map(StatusEntry::from).collect(),
        orders,
    })
}

/// Runs one mutation, then re-fetches every collection.
///
/// A failed mutation skips the re-fetch. A failed re-fetch still reports the
/// mutation as done, just without a fresh snapshot.
async fn mutate<F, T>(
    remote: &RemoteClient,
    mutation: F,
    done: &'static str,
    failed: &'static str,
) -> Result<AdminView, AppError>
where
    F: Future<Output = Result<T, RemoteError>>,
{
    mutation
        .await
        .map_err(|source| AppError::Failed {
            action: failed,
            source,
        })?;

    info!(action = done, "admin change applied");

    let snapshot = match load_snapshot(remote).await {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            error!(error = %err, "admin re-fetch failed");
            None
        }
    };

    Ok(AdminView {
        notice: Notice::success(done),
        snapshot,
    })
}

fn require(fields: &[(&'static str, &str)]) -> Result<(), AppError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "required: {}",
            missing.join(", ")
        )))
    }
}

pub async fn add_faq(
    remote: &RemoteClient,
    question: &str,
    answer: &str,
) -> Result<AdminView, AppError> {
    require(&[("question", question), ("answer", answer)])?;

    let existing = remote
        .list_faq()
        .await
        .map_err(|source| AppError::Failed {
            action: "could not add the question",
            source,
        })?;

    let item = NewFaqItem {
        question: question.trim().to_string(),
        answer: answer.trim().to_string(),
        order_position: existing.len() as i64 + 1,
    };

    mutate(
        remote,
        remote.create_faq(&item),
        "question added",
        "could not add the question",
    )
    .await
}

pub async fn update_faq(remote: &RemoteClient, update: FaqUpdate) -> Result<AdminView, AppError> {
    require(&[
        ("question", update.question.as_str()),
        ("answer", update.answer.as_str()),
    ])?;

    let update = FaqUpdate {
        question: update.question.trim().to_string(),
        answer: update.answer.trim().to_string(),
        ..update
    };

    mutate(
        remote,
        remote.update_faq(&update),
        "question updated",
        "could not update the question",
    )
    .await
}

pub async fn delete_faq(remote: &RemoteClient, id: i64) -> Result<AdminView, AppError> {
    mutate(
        remote,
        remote.delete_faq(id),
        "question removed",
        "could not remove the question",
    )
    .await
}

pub async fn add_pickup_point(
    remote: &RemoteClient,
    point: NewPickupPoint,
) -> Result<AdminView, AppError> {
    require(&[("name", point.name.as_str()), ("address", point.address.as_str())])?;

    mutate(
        remote,
        remote.create_pickup_point(&point),
        "pickup point added",
        "could not add the pickup point",
    )
    .await
}

pub async fn update_pickup_point(
    remote: &RemoteClient,
    point: PickupPoint,
) -> Result<AdminView, AppError> {
    require(&[("name", point.name.as_str()), ("address", point.address.as_str())])?;

    mutate(
        remote,
        remote.update_pickup_point(&point),
        "pickup point updated",
        "could not update the pickup point",
    )
    .await
}

pub async fn delete_pickup_point(remote: &RemoteClient, id: i64) -> Result<AdminView, AppError> {
    mutate(
        remote,
        remote.delete_pickup_point(id),
        "pickup point removed",
        "could not remove the pickup point",
    )
    .await
}

pub async fn add_delivery_point(
    remote: &RemoteClient,
    point: NewDeliveryPoint,
) -> Result<AdminView, AppError> {
    require(&[
        ("name", point.name.as_str()),
        ("address", point.address.as_str()),
        ("city", point.city.as_str()),
    ])?;

    mutate(
        remote,
        remote.create_delivery_point(&point),
        "delivery point added",
        "could not add the delivery point",
    )
    .await
}

pub async fn delete_delivery_point(remote: &RemoteClient, id: i64) -> Result<AdminView, AppError> {
    mutate(
        remote,
        remote.delete_delivery_point(id),
        "delivery point removed",
        "could not remove the delivery point",
    )
    .await
}

pub async fn add_status(
    remote: &RemoteClient,
    status_key: &str,
    status_label: &str,
    status_color: &str,
) -> Result<AdminView, AppError> {
    require(&[
        ("status_key", status_key),
        ("status_label", status_label),
        ("status_color", status_color),
    ])?;

    let existing = remote
        .list_statuses()
        .await
        .map_err(|source| AppError::Failed {
            action: "could not add the status",
            source,
        })?;

    let status = NewStatusDefinition {
        status_key: status_key.trim().to_string(),
        status_label: status_label.trim().to_string(),
        status_color: status_color.trim().to_string(),
        order_position: existing.len() as i64 + 1,
    };

    mutate(
        remote,
        remote.create_status(&status),
        "status added",
        "could not add the status",
    )
    .await
}

pub async fn delete_status(remote: &RemoteClient, id: i64) -> Result<AdminView, AppError> {
    mutate(
        remote,
        remote.delete_status(id),
        "status removed",
        "could not remove the status",
    )
    .await
}

pub async fn save_settings(
    remote: &RemoteClient,
    settings: Settings,
) -> Result<AdminView, AppError> {
    mutate(
        remote,
        remote.update_settings(&settings),
        "settings saved",
        "could not save the settings",
    )
    .await
}

pub async fn update_order_status(
    remote: &RemoteClient,
    order_id: i64,
    status: OrderStatus,
) -> Result<AdminView, AppError> {
    mutate(
        remote,
        remote.update_order_status(order_id, status),
        "order status updated",
        "could not update the order status",
    )
    .await
}
