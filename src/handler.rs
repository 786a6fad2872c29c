use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;

use std::sync::Arc;

use crate::dto::EmailRequest;
use crate::service::EmailService;

#[debug_handler]
pub async fn generate_email(
    State(service): State<Arc<EmailService>>,
    Json(payload): Json<EmailRequest>,
) -> Response {
    let reply = service.generate_email_reply(payload).await;
    (StatusCode::OK, reply).into_response()
}

#[debug_handler]
pub async fn health_check() -> Response {
    (StatusCode::OK, "Smart Email Assistant is up!").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_returns_banner() {
        let response = health_check().await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Smart Email Assistant is up!");
    }
}
