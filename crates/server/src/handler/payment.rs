use crate::{middleware::SimpleValidatedJson, state::AppState};
use axum::{
    Json,
    extract::Extension,
    response::IntoResponse,
    routing::post,
};
use shared::{
    abstract_trait::DynPaymentService,
    domain::{
        requests::{CreatePaymentRequest, VerifyPaymentRequest},
        responses::{ApiResponse, OrderDetailResponse, PaymentIntentResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/orders/create-payment",
    tag = "Payment",
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "Gateway order created", body = ApiResponse<PaymentIntentResponse>),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Payment already captured"),
        (status = 503, description = "Payment gateway unavailable")
    )
)]
pub async fn create_payment(
    Extension(service): Extension<DynPaymentService>,
    SimpleValidatedJson(req): SimpleValidatedJson<CreatePaymentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_payment(&req).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/orders/verify-payment",
    tag = "Payment",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified and recorded", body = ApiResponse<OrderDetailResponse>),
        (status = 401, description = "Invalid payment signature"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Payment already captured")
    )
)]
pub async fn verify_payment(
    Extension(service): Extension<DynPaymentService>,
    SimpleValidatedJson(req): SimpleValidatedJson<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.verify_payment(&req).await?;
    Ok(Json(response))
}

pub fn payment_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/orders/create-payment", post(create_payment))
        .route("/api/orders/verify-payment", post(verify_payment))
        .layer(Extension(app_state.di_container.payment.clone()))
}
