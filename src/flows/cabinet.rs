use serde::Serialize;

use crate::error::AppError;
use crate::models::order::OrderView;
use crate::models::session::Session;
use crate::remote::RemoteClient;

#[derive(Debug, Serialize)]
pub struct CabinetView {
    pub email: String,
    pub orders: Vec<OrderView>,
}

// Placeholder sign-ins carry no upstream user id and see the unfiltered
// listing.
pub async fn load(remote: &RemoteClient, session: &Session) -> Result<CabinetView, AppError> {
    let orders = remote
        .list_orders(session.user_id)
        .await
        .map_err(|source| AppError::Failed {
            action: "could not load your orders",
            source,
        })?;

    Ok(CabinetView {
        email: session.email.clone(),
        orders: orders.into_iter().map(OrderView::from).collect(),
    })
}
