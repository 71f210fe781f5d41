//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST + SSE API that delegates to application use cases.
//! Identity arrives pre-authenticated in `x-user-id` / `x-user-role`
//! headers from the session-issuing collaborator; the engine trusts
//! them for ownership checks but performs no authentication itself.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
};
use tokio_stream::{Stream, StreamExt};

use crate::application::dto::{
    AdvanceOrderRequestDto, CheckoutRequestDto, CheckoutResponseDto, DeliveryFeeRequestDto,
    DeliveryFeeResponseDto, NotificationDto, OrderDto, build_cart,
};
use crate::application::ports::{CheckoutStorePort, SideEffectPort};
use crate::application::use_cases::{
    AdvanceOrderStatusUseCase, ListOrdersUseCase, NotificationInboxUseCase, PlaceOrderUseCase,
};
use crate::domain::notifications::NotificationRepository;
use crate::domain::orders::repository::OrderRepository;
use crate::domain::orders::{Actor, ActorRole};
use crate::domain::pricing::compute_delivery_fee;
use crate::domain::shared::{NotificationId, OrderId, UserId};
use crate::infrastructure::realtime::ChangeFeed;
use crate::observability;

use super::response::{ApiError, HealthResponse};

/// Application state shared across handlers.
pub struct AppState<S, O, N, F>
where
    S: CheckoutStorePort,
    O: OrderRepository,
    N: NotificationRepository,
    F: SideEffectPort,
{
    /// Use case for placing orders.
    pub place_order: Arc<PlaceOrderUseCase<S, F, ChangeFeed>>,
    /// Use case for advancing order status.
    pub advance_order: Arc<AdvanceOrderStatusUseCase<O, ChangeFeed>>,
    /// Use case for role-scoped order lists.
    pub list_orders: Arc<ListOrdersUseCase<O>>,
    /// Use case for the notification inbox.
    pub inbox: Arc<NotificationInboxUseCase<N>>,
    /// Change feed the SSE endpoints subscribe to.
    pub feed: Arc<ChangeFeed>,
    /// Application version.
    pub version: String,
}

impl<S, O, N, F> Clone for AppState<S, O, N, F>
where
    S: CheckoutStorePort,
    O: OrderRepository,
    N: NotificationRepository,
    F: SideEffectPort,
{
    fn clone(&self) -> Self {
        Self {
            place_order: Arc::clone(&self.place_order),
            advance_order: Arc::clone(&self.advance_order),
            list_orders: Arc::clone(&self.list_orders),
            inbox: Arc::clone(&self.inbox),
            feed: Arc::clone(&self.feed),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<S, O, N, F>(state: AppState<S, O, N, F>) -> Router
where
    S: CheckoutStorePort + 'static,
    O: OrderRepository + 'static,
    N: NotificationRepository + 'static,
    F: SideEffectPort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/api/v1/delivery-fee", post(delivery_fee))
        .route("/api/v1/checkout", post(checkout))
        .route("/api/v1/orders", get(list_orders))
        .route("/api/v1/orders/{id}/status", post(advance_order_status))
        .route("/api/v1/notifications", get(list_notifications))
        .route("/api/v1/notifications/unread-count", get(unread_count))
        .route("/api/v1/notifications/{id}/read", post(mark_read))
        .route("/api/v1/notifications/read-all", post(mark_all_read))
        .route("/api/v1/stream/orders", get(stream_orders))
        .route("/api/v1/stream/stock", get(stream_stock))
        .route("/api/v1/stream/notifications", get(stream_notifications))
        .with_state(state)
}

/// Extract the trusted identity headers into an actor.
fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, ApiError> {
    let user_id = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::unauthorized("missing x-user-id header"))?;
    let role = headers
        .get("x-user-role")
        .and_then(|v| v.to_str().ok())
        .and_then(ActorRole::parse)
        .ok_or_else(|| ApiError::unauthorized("missing or invalid x-user-role header"))?;
    Ok(Actor::new(UserId::new(user_id), role))
}

async fn health_check<S, O, N, F>(State(state): State<AppState<S, O, N, F>>) -> impl IntoResponse
where
    S: CheckoutStorePort,
    O: OrderRepository,
    N: NotificationRepository,
    F: SideEffectPort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

async fn metrics() -> impl IntoResponse {
    observability::render_metrics()
}

/// Price preview for the current cart. Pure computation, no identity
/// required.
async fn delivery_fee(
    Json(request): Json<DeliveryFeeRequestDto>,
) -> Result<Json<DeliveryFeeResponseDto>, ApiError> {
    let cart = build_cart(request.items).map_err(|e| ApiError::unprocessable(e.to_string()))?;
    Ok(Json(DeliveryFeeResponseDto {
        delivery_fee: compute_delivery_fee(&cart),
        subtotal: cart.subtotal(),
    }))
}

async fn checkout<S, O, N, F>(
    State(state): State<AppState<S, O, N, F>>,
    headers: HeaderMap,
    Json(request): Json<CheckoutRequestDto>,
) -> Result<Json<CheckoutResponseDto>, ApiError>
where
    S: CheckoutStorePort,
    O: OrderRepository,
    N: NotificationRepository,
    F: SideEffectPort,
{
    let actor = actor_from_headers(&headers)?;
    let cart = build_cart(request.items).map_err(|e| ApiError::unprocessable(e.to_string()))?;

    let order = state
        .place_order
        .execute(
            actor.user_id,
            &cart,
            request.shipping_address,
            request.payment_method,
        )
        .await?;

    Ok(Json(CheckoutResponseDto {
        order_id: order.id().clone(),
        total: order.total(),
        delivery_fee: order.delivery_fee(),
        status: order.status(),
    }))
}

async fn list_orders<S, O, N, F>(
    State(state): State<AppState<S, O, N, F>>,
    headers: HeaderMap,
) -> Result<Json<Vec<OrderDto>>, ApiError>
where
    S: CheckoutStorePort,
    O: OrderRepository,
    N: NotificationRepository,
    F: SideEffectPort,
{
    let actor = actor_from_headers(&headers)?;
    let orders = state.list_orders.execute(&actor).await?;
    Ok(Json(orders.iter().map(OrderDto::from_order).collect()))
}

async fn advance_order_status<S, O, N, F>(
    State(state): State<AppState<S, O, N, F>>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
    Json(request): Json<AdvanceOrderRequestDto>,
) -> Result<Json<OrderDto>, ApiError>
where
    S: CheckoutStorePort,
    O: OrderRepository,
    N: NotificationRepository,
    F: SideEffectPort,
{
    let actor = actor_from_headers(&headers)?;
    let order = state
        .advance_order
        .execute(&actor, &OrderId::new(order_id), request.status)
        .await?;
    Ok(Json(OrderDto::from_order(&order)))
}

async fn list_notifications<S, O, N, F>(
    State(state): State<AppState<S, O, N, F>>,
    headers: HeaderMap,
) -> Result<Json<Vec<NotificationDto>>, ApiError>
where
    S: CheckoutStorePort,
    O: OrderRepository,
    N: NotificationRepository,
    F: SideEffectPort,
{
    let actor = actor_from_headers(&headers)?;
    let records = state.inbox.list(&actor.user_id).await?;
    Ok(Json(
        records.iter().map(NotificationDto::from_notification).collect(),
    ))
}

async fn unread_count<S, O, N, F>(
    State(state): State<AppState<S, O, N, F>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError>
where
    S: CheckoutStorePort,
    O: OrderRepository,
    N: NotificationRepository,
    F: SideEffectPort,
{
    let actor = actor_from_headers(&headers)?;
    let count = state.inbox.unread_count(&actor.user_id).await?;
    Ok(Json(serde_json::json!({ "unread": count })))
}

async fn mark_read<S, O, N, F>(
    State(state): State<AppState<S, O, N, F>>,
    headers: HeaderMap,
    Path(notification_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError>
where
    S: CheckoutStorePort,
    O: OrderRepository,
    N: NotificationRepository,
    F: SideEffectPort,
{
    let actor = actor_from_headers(&headers)?;
    state
        .inbox
        .mark_read(&actor.user_id, &NotificationId::new(notification_id))
        .await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

async fn mark_all_read<S, O, N, F>(
    State(state): State<AppState<S, O, N, F>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError>
where
    S: CheckoutStorePort,
    O: OrderRepository,
    N: NotificationRepository,
    F: SideEffectPort,
{
    let actor = actor_from_headers(&headers)?;
    state.inbox.mark_all_read(&actor.user_id).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

// =============================================================================
// SSE streams
// =============================================================================

fn sse_events<T, St>(
    name: &'static str,
    stream: St,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    T: serde::Serialize,
    St: Stream<Item = T> + Send + 'static,
{
    let events = stream.filter_map(move |item| match Event::default().event(name).json_data(&item)
    {
        Ok(event) => Some(Ok(event)),
        Err(e) => {
            tracing::warn!(stream = name, error = %e, "failed to encode sse event");
            None
        }
    });
    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Order mutation stream: customers get their own orders, sellers and
/// admins get the unfiltered feed their dashboards reconcile against.
async fn stream_orders<S, O, N, F>(
    State(state): State<AppState<S, O, N, F>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    S: CheckoutStorePort,
    O: OrderRepository,
    N: NotificationRepository,
    F: SideEffectPort,
{
    let actor = actor_from_headers(&headers)?;
    let filter = match actor.role {
        ActorRole::Customer => Some(actor.user_id),
        ActorRole::Seller | ActorRole::Admin => None,
    };
    Ok(sse_events("order", state.feed.order_changes(filter)))
}

/// Stock mutation stream, unfiltered for all browsing buyers.
async fn stream_stock<S, O, N, F>(
    State(state): State<AppState<S, O, N, F>>,
) -> impl IntoResponse
where
    S: CheckoutStorePort,
    O: OrderRepository,
    N: NotificationRepository,
    F: SideEffectPort,
{
    sse_events("stock", state.feed.stock_changes())
}

/// Notification stream scoped to the authenticated recipient.
async fn stream_notifications<S, O, N, F>(
    State(state): State<AppState<S, O, N, F>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    S: CheckoutStorePort,
    O: OrderRepository,
    N: NotificationRepository,
    F: SideEffectPort,
{
    let actor = actor_from_headers(&headers)?;
    Ok(sse_events(
        "notification",
        state.feed.notifications(actor.user_id),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn actor_extraction_requires_both_headers() {
        let mut headers = HeaderMap::new();
        assert!(actor_from_headers(&headers).is_err());

        headers.insert("x-user-id", HeaderValue::from_static("u-1"));
        assert!(actor_from_headers(&headers).is_err());

        headers.insert("x-user-role", HeaderValue::from_static("SELLER"));
        let actor = actor_from_headers(&headers).unwrap();
        assert_eq!(actor.user_id.as_str(), "u-1");
        assert_eq!(actor.role, ActorRole::Seller);
    }

    #[test]
    fn actor_extraction_rejects_unknown_role() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_static("u-1"));
        headers.insert("x-user-role", HeaderValue::from_static("ROOT"));
        assert!(actor_from_headers(&headers).is_err());
    }
}
