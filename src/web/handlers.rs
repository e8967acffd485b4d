use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde_json::json;

use crate::chat::ChatGateway;
use crate::error::ChatError;
use crate::web::models::ChatRequest;

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Chat endpoint: validation, generation and error mapping all live behind
// the gateway; this handler only logs and converts.
pub async fn chat(
    gateway: web::Data<ChatGateway>,
    req: web::Json<ChatRequest>,
) -> Result<HttpResponse, ChatError> {
    let payload = req.into_inner();

    info!(
        "Chat request: {} chars, {} history entries",
        payload.message.len(),
        payload.history.as_ref().map_or(0, Vec::len)
    );

    match gateway.handle(&payload).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            error!("Chat request failed: {:?}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::web::Data;
    use actix_web::{test, App};
    use async_trait::async_trait;

    use crate::chat::ChatGateway;
    use crate::model::{ChatModel, GenerateError};
    use crate::web::models::{ChatResponse, ErrorBody, PromptMessage};
    use crate::web::routes;

    use super::*;

    enum FakeModel {
        Reply(&'static str),
        Timeout,
        Upstream,
    }

    #[async_trait]
    impl ChatModel for FakeModel {
        async fn generate(&self, _messages: &[PromptMessage]) -> Result<String, GenerateError> {
            match self {
                FakeModel::Reply(text) => Ok(text.to_string()),
                FakeModel::Timeout => Err(GenerateError::Timeout),
                FakeModel::Upstream => {
                    Err(GenerateError::Upstream("503 model unavailable".to_string()))
                }
            }
        }
    }

    fn gateway_with(model: FakeModel) -> Data<ChatGateway> {
        Data::new(ChatGateway::new(Arc::new(model)))
    }

    #[actix_web::test]
    async fn chat_returns_reply_on_success() {
        let app = test::init_service(
            App::new()
                .app_data(gateway_with(FakeModel::Reply("Le mall est ouvert de 10h à 22h.")))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({ "message": "Quels sont les horaires?", "history": null }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: ChatResponse = test::read_body_json(resp).await;
        assert_eq!(body.reply, "Le mall est ouvert de 10h à 22h.");
    }

    #[actix_web::test]
    async fn chat_accepts_history() {
        let app = test::init_service(
            App::new()
                .app_data(gateway_with(FakeModel::Reply("Avec plaisir!")))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({
                "message": "Merci",
                "history": [
                    { "from_role": "user", "text": "Bonjour" },
                    { "from_role": "bot", "text": "Bonjour, comment puis-je aider?" }
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn whitespace_message_yields_400() {
        let app = test::init_service(
            App::new()
                .app_data(gateway_with(FakeModel::Reply("unreachable")))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({ "message": "  ", "history": null }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert!(body.detail.contains("Message must not be empty."));
    }

    #[actix_web::test]
    async fn provider_timeout_yields_504() {
        let app = test::init_service(
            App::new()
                .app_data(gateway_with(FakeModel::Timeout))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({ "message": "Où est le parking?" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert!(body.detail.contains("Délai dépassé"));
    }

    #[actix_web::test]
    async fn provider_failure_yields_502() {
        let app = test::init_service(
            App::new()
                .app_data(gateway_with(FakeModel::Upstream))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({ "message": "Y a-t-il des promotions?" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert!(body.detail.contains("Erreur lors de l'appel"));
    }

    #[actix_web::test]
    async fn unknown_history_role_yields_400() {
        let app = test::init_service(
            App::new()
                .app_data(gateway_with(FakeModel::Reply("unreachable")))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({
                "message": "Bonjour",
                "history": [{ "from_role": "assistant", "text": "hi" }]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn health_reports_ok() {
        let app = test::init_service(
            App::new()
                .app_data(gateway_with(FakeModel::Reply("unused")))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }
}
