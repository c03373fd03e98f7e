use std::time::{Duration, Instant};

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::models::content::{
    FaqItem, FaqUpdate, NewFaqItem, NewStatusDefinition, Settings, StatusDefinition,
};
use crate::models::order::{NewOrder, Order, OrderStatus};
use crate::models::point::{DeliveryPoint, NewDeliveryPoint, NewPickupPoint, PickupPoint};
use crate::observability::metrics::Metrics;
use crate::remote::{QrCode, RegisteredUser, Registration, RemoteEndpoints, RemoteError};

const PICKUP_POINTS: &str = "pickup_points";
const DELIVERY_POINTS: &str = "delivery_points";
const ORDERS: &str = "orders";
const SETTINGS: &str = "settings";
const FAQ: &str = "faq";
const STATUSES: &str = "statuses";
const QR: &str = "qr";
const AUTH: &str = "auth";

#[derive(Deserialize)]
struct RegisterResponse {
    user: RegisteredUser,
}

#[derive(Serialize)]
struct StatusChange {
    order_id: i64,
    status: OrderStatus,
}

#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    endpoints: RemoteEndpoints,
    timeout: Option<Duration>,
    metrics: Metrics,
}

impl RemoteClient {
    pub fn new(
        endpoints: RemoteEndpoints,
        timeout: Option<Duration>,
        metrics: Metrics,
    ) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|source| RemoteError::Network {
                resource: "client",
                source,
            })?;

        Ok(Self {
            http,
            endpoints,
            timeout,
            metrics,
        })
    }

    // pickup points

    pub async fn list_pickup_points(&self) -> Result<Vec<PickupPoint>, RemoteError> {
        let request = self.http.get(&self.endpoints.pickup_points);
        self.fetch(PICKUP_POINTS, request).await
    }

    pub async fn create_pickup_point(
        &self,
        point: &NewPickupPoint,
    ) -> Result<PickupPoint, RemoteError> {
        let request = self.http.post(&self.endpoints.pickup_points).json(point);
        self.fetch(PICKUP_POINTS, request).await
    }

    pub async fn update_pickup_point(&self, point: &PickupPoint) -> Result<PickupPoint, RemoteError> {
        let request = self.http.put(&self.endpoints.pickup_points).json(point);
        self.fetch(PICKUP_POINTS, request).await
    }

    pub async fn delete_pickup_point(&self, id: i64) -> Result<(), RemoteError> {
        let request = self
            .http
            .delete(&self.endpoints.pickup_points)
            .json(&json!({ "id": id }));
        self.execute(PICKUP_POINTS, request).await
    }

    // delivery points

    pub async fn list_delivery_points(&self) -> Result<Vec<DeliveryPoint>, RemoteError> {
        let request = self.delivery_points(self.http.get(&self.endpoints.pickup_points));
        self.fetch(DELIVERY_POINTS, request).await
    }

    pub async fn create_delivery_point(
        &self,
        point: &NewDeliveryPoint,
    ) -> Result<DeliveryPoint, RemoteError> {
        let request = self
            .delivery_points(self.http.post(&self.endpoints.pickup_points))
            .json(point);
        self.fetch(DELIVERY_POINTS, request).await
    }

    pub async fn delete_delivery_point(&self, id: i64) -> Result<(), RemoteError> {
        let request = self
            .delivery_points(self.http.delete(&self.endpoints.pickup_points))
            .json(&json!({ "id": id }));
        self.execute(DELIVERY_POINTS, request).await
    }

    fn delivery_points(&self, request: RequestBuilder) -> RequestBuilder {
        request.query(&[("action", "delivery")])
    }

    // settings, faq, statuses

    pub async fn get_settings(&self) -> Result<Settings, RemoteError> {
        let request = self.http.get(&self.endpoints.settings);
        self.fetch(SETTINGS, request).await
    }

    pub async fn update_settings(&self, settings: &Settings) -> Result<Settings, RemoteError> {
        let request = self.http.put(&self.endpoints.settings).json(settings);
        self.fetch(SETTINGS, request).await
    }

    pub async fn list_faq(&self) -> Result<Vec<FaqItem>, RemoteError> {
        let request = self.settings_resource(self.http.get(&self.endpoints.settings), FAQ);
        let mut items: Vec<FaqItem> = self.fetch(FAQ, request).await?;
        items.sort_by_key(|item| item.order_position);
        Ok(items)
    }

    pub async fn create_faq(&self, item: &NewFaqItem) -> Result<FaqItem, RemoteError> {
        let request = self
            .settings_resource(self.http.post(&self.endpoints.settings), FAQ)
            .json(item);
        self.fetch(FAQ, request).await
    }

    pub async fn update_faq(&self, item: &FaqUpdate) -> Result<FaqItem, RemoteError> {
        let request = self
            .settings_resource(self.http.put(&self.endpoints.settings), FAQ)
            .json(item);
        self.fetch(FAQ, request).await
    }

    pub async fn delete_faq(&self, id: i64) -> Result<(), RemoteError> {
        let request = self
            .settings_resource(self.http.delete(&self.endpoints.settings), FAQ)
            .json(&json!({ "id": id }));
        self.execute(FAQ, request).await
    }

    pub async fn list_statuses(&self) -> Result<Vec<StatusDefinition>, RemoteError> {
        let request = self.settings_resource(self.http.get(&self.endpoints.settings), STATUSES);
        let mut statuses: Vec<StatusDefinition> = self.fetch(STATUSES, request).await?;
        statuses.sort_by_key(|status| status.order_position);
        Ok(statuses)
    }

    pub async fn create_status(
        &self,
        status: &NewStatusDefinition,
    ) -> Result<StatusDefinition, RemoteError> {
        let request = self
            .settings_resource(self.http.post(&self.endpoints.settings), STATUSES)
            .json(status);
        self.fetch(STATUSES, request).await
    }

    pub async fn delete_status(&self, id: i64) -> Result<(), RemoteError> {
        let request = self
            .settings_resource(self.http.delete(&self.endpoints.settings), STATUSES)
            .json(&json!({ "id": id }));
        self.execute(STATUSES, request).await
    }

    fn settings_resource(&self, request: RequestBuilder, resource: &str) -> RequestBuilder {
        request.query(&[("resource", resource)])
    }

    // orders

    pub async fn list_orders(&self, user_id: Option<i64>) -> Result<Vec<Order>, RemoteError> {
        let mut request = self.http.get(&self.endpoints.orders);
        if let Some(user_id) = user_id {
            request = request.query(&[("user_id", user_id)]);
        }
        self.fetch(ORDERS, request).await
    }

    /// Looks an order up by its customer-facing number.
    ///
    /// A non-success status, an empty body or a JSON `null` all mean "no such
    /// order" and yield `Ok(None)`. Only transport and decode failures are errors.
    pub async fn find_order(&self, order_number: &str) -> Result<Option<Order>, RemoteError> {
        let request = self
            .http
            .get(&self.endpoints.orders)
            .query(&[("order_number", order_number)]);

        let started = Instant::now();
        let response = match self.send(ORDERS, request).await {
            Ok(response) => response,
            Err(err) => return Err(self.failed(started, err)),
        };

        if !response.status().is_success() {
            debug!(status = %response.status(), order_number, "order lookup missed");
            self.observe(ORDERS, "not_found", started);
            return Ok(None);
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => {
                return Err(self.failed(started, RemoteError::Network {
                    resource: ORDERS,
                    source,
                }));
            }
        };

        if body.iter().all(u8::is_ascii_whitespace) {
            self.observe(ORDERS, "not_found", started);
            return Ok(None);
        }

        match serde_json::from_slice::<Option<Order>>(&body) {
            Ok(order) => {
                let outcome = if order.is_some() { "success" } else { "not_found" };
                self.observe(ORDERS, outcome, started);
                Ok(order)
            }
            Err(err) => Err(self.failed(started, RemoteError::Decode {
                resource: ORDERS,
                reason: err.to_string(),
            })),
        }
    }

    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, RemoteError> {
        let request = self.http.post(&self.endpoints.orders).json(order);
        self.fetch(ORDERS, request).await
    }

    pub async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<Order, RemoteError> {
        let request = self
            .http
            .put(&self.endpoints.orders)
            .json(&StatusChange { order_id, status });
        self.fetch(ORDERS, request).await
    }

    // qr, auth

    pub async fn generate_qr(&self, order_number: &str) -> Result<QrCode, RemoteError> {
        let request = self
            .http
            .post(&self.endpoints.qr)
            .json(&json!({ "order_number": order_number }));
        self.fetch(QR, request).await
    }

    pub async fn register(&self, registration: &Registration) -> Result<RegisteredUser, RemoteError> {
        let request = self.http.post(&self.endpoints.auth).json(&json!({
            "action": "register",
            "email": registration.email,
            "password": registration.password,
            "name": registration.name,
            "phone": registration.phone,
        }));
        let response: RegisterResponse = self.fetch(AUTH, request).await?;
        Ok(response.user)
    }

    // plumbing

    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        request: RequestBuilder,
    ) -> Result<T, RemoteError> {
        let started = Instant::now();
        let result = async {
            let response = self.checked(resource, request).await?;
            response
                .json::<T>()
                .await
                .map_err(|err| RemoteError::Decode {
                    resource,
                    reason: err.to_string(),
                })
        }
        .await;

        match result {
            Ok(value) => {
                self.observe(resource, "success", started);
                Ok(value)
            }
            Err(err) => Err(self.failed(started, err)),
        }
    }

    async fn execute(
        &self,
        resource: &'static str,
        request: RequestBuilder,
    ) -> Result<(), RemoteError> {
        let started = Instant::now();
        match self.checked(resource, request).await {
            Ok(_) => {
                self.observe(resource, "success", started);
                Ok(())
            }
            Err(err) => Err(self.failed(started, err)),
        }
    }

    async fn checked(
        &self,
        resource: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, RemoteError> {
        let response = self.send(resource, request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_default();

        Err(RemoteError::Status {
            resource,
            status: status.as_u16(),
            message,
        })
    }

    async fn send(
        &self,
        resource: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, RemoteError> {
        let request = match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        };

        request
            .send()
            .await
            .map_err(|source| RemoteError::Network { resource, source })
    }

    fn failed(&self, started: Instant, err: RemoteError) -> RemoteError {
        let outcome = match &err {
            RemoteError::Network { .. } => "network_error",
            RemoteError::Status { .. } => "status_error",
            RemoteError::Decode { .. } => "decode_error",
        };
        self.observe(err.resource(), outcome, started);
        warn!(resource = err.resource(), error = %err, "upstream request failed");
        err
    }

    fn observe(&self, resource: &str, outcome: &str, started: Instant) {
        self.metrics
            .upstream_requests_total
            .with_label_values(&[resource, outcome])
            .inc();
        self.metrics
            .upstream_latency_seconds
            .with_label_values(&[resource])
            .observe(started.elapsed().as_secs_f64());
    }
}
