//! Order handler: create, update, fetch and list orders, and send order
//! confirmation emails.

use chrono::Utc;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use orderdesk_core::envelope::{status, HandlerResponse, RequestEnvelope};
use orderdesk_core::notify::EmailMessage;
use orderdesk_core::order::{
    CreateOrderRequest, Order, OrderAction, OrderKeyRequest, SendConfirmationRequest,
    UpdateOrderRequest,
};

use super::{parse_action, HandlerError, HandlerResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderCreated<'a> {
    message: &'static str,
    order_id: &'a str,
    confirmation_sent: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderUpdated<'a> {
    message: &'static str,
    updated_order: &'a Order,
}

/// Runs one order event to completion.
pub async fn handle(state: &AppState, envelope: RequestEnvelope) -> HandlerResponse {
    let span = tracing::info_span!(
        "invocation",
        handler = "orders",
        action = envelope.action.as_deref().unwrap_or_default(),
        request_id = %Uuid::new_v4(),
    );

    dispatch(state, &envelope).instrument(span).await
}

async fn dispatch(state: &AppState, envelope: &RequestEnvelope) -> HandlerResponse {
    tracing::info!(event = %envelope.redacted(), "Received event");

    let action: OrderAction = match parse_action(envelope) {
        Ok(action) => action,
        Err(e) => return HandlerError::from(e).into_response("Invalid action", Some(envelope)),
    };

    let result = match action {
        OrderAction::CreateOrder => create_order(state, envelope).await,
        OrderAction::UpdateOrder => update_order(state, envelope).await,
        OrderAction::GetOrder => get_order(state, envelope).await,
        OrderAction::ListOrders => list_orders(state).await,
        OrderAction::SendOrderConfirmation => send_order_confirmation(state, envelope).await,
    };

    result.unwrap_or_else(|e| e.into_response(action.failure_message(), Some(envelope)))
}

// ============================================================================
// Operations
// ============================================================================

async fn create_order(
    state: &AppState,
    envelope: &RequestEnvelope,
) -> HandlerResult<HandlerResponse> {
    let request: CreateOrderRequest = envelope.payload()?;
    let email = request.email.clone();
    let order = request.into_order(Utc::now())?;

    state.order_repo.put_order(&order).await?;
    tracing::info!(order_id = %order.order_id, "Order created");

    // The order is already stored; a failed email only downgrades the result.
    let confirmation = SendConfirmationRequest::new(Some(order.order_id.clone()), email);
    let confirmation_sent = match send_confirmation(state, confirmation).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                order_id = %order.order_id,
                error = %e,
                "Order created but confirmation email was not sent"
            );
            false
        }
    };

    Ok(HandlerResponse::created(&OrderCreated {
        message: "Order created successfully",
        order_id: &order.order_id,
        confirmation_sent,
    }))
}

async fn update_order(
    state: &AppState,
    envelope: &RequestEnvelope,
) -> HandlerResult<HandlerResponse> {
    let (order_id, patch) = envelope
        .payload::<UpdateOrderRequest>()?
        .into_patch(Utc::now())?;

    if state.order_repo.get_order(&order_id).await?.is_none() {
        return Err(HandlerError::NotFound {
            entity_type: "Order",
            id: order_id,
        });
    }

    let updated = state.order_repo.update_order(&order_id, &patch).await?;
    tracing::info!(order_id = %order_id, status = %updated.status, "Order updated");

    Ok(HandlerResponse::ok(&OrderUpdated {
        message: "Order updated successfully",
        updated_order: &updated,
    }))
}

async fn get_order(state: &AppState, envelope: &RequestEnvelope) -> HandlerResult<HandlerResponse> {
    let order_id = envelope.payload::<OrderKeyRequest>()?.into_key()?;

    let order = state.order_repo.get_order(&order_id).await?;

    match order {
        Some(order) => Ok(HandlerResponse::ok(&order)),
        None => Err(HandlerError::NotFound {
            entity_type: "Order",
            id: order_id,
        }),
    }
}

async fn list_orders(state: &AppState) -> HandlerResult<HandlerResponse> {
    let orders = state.order_repo.list_orders().await?;
    tracing::debug!(count = orders.len(), "Listed orders");

    Ok(HandlerResponse::ok(&orders))
}

async fn send_order_confirmation(
    state: &AppState,
    envelope: &RequestEnvelope,
) -> HandlerResult<HandlerResponse> {
    send_confirmation(state, envelope.payload()?).await?;

    Ok(HandlerResponse::message(
        status::OK,
        "Order confirmation sent",
    ))
}

async fn send_confirmation(state: &AppState, request: SendConfirmationRequest) -> HandlerResult<()> {
    let (order_id, email) = request.into_parts()?;

    state
        .notifier
        .send(&EmailMessage::order_confirmation(&order_id, email))
        .await?;
    tracing::info!(order_id = %order_id, "Order confirmation sent");

    Ok(())
}
