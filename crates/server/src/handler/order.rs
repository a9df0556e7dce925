use crate::{middleware::SimpleValidatedJson, state::AppState};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use shared::{
    abstract_trait::{DynOrderCommandService, DynOrderQueryService},
    domain::{
        requests::{CreateOrderRequest, FindAllOrders, TransitionStatusRequest},
        responses::{ApiResponse, ApiResponsePagination, OrderDetailResponse, OrderResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created with status PENDING", body = ApiResponse<OrderDetailResponse>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_order(
    Extension(service): Extension<DynOrderCommandService>,
    SimpleValidatedJson(req): SimpleValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_order(&req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{order_number}",
    tag = "Order",
    params(("order_number" = String, Path, description = "Public order number")),
    responses(
        (status = 200, description = "Order with full status history", body = ApiResponse<OrderDetailResponse>),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderQueryService>,
    Path(order_number): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_order_number(&order_number).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = "Order",
    params(FindAllOrders),
    responses(
        (status = 200, description = "Paginated list of orders", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_admin_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Query(params): Query<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    tag = "Order",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = TransitionStatusRequest,
    responses(
        (status = 200, description = "Order status updated", body = ApiResponse<OrderDetailResponse>),
        (status = 400, description = "Transition not allowed from the current status"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn transition_order_status(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(req): SimpleValidatedJson<TransitionStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.transition_status(id, &req).await?;
    Ok(Json(response))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/orders", post(create_order))
        .route("/api/orders/{order_number}", get(get_order))
        .route("/api/admin/orders", get(get_admin_orders))
        .route("/api/admin/orders/{id}/status", patch(transition_order_status))
        .layer(Extension(app_state.di_container.order_command.clone()))
        .layer(Extension(app_state.di_container.order_query.clone()))
}
