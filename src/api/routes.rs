use actix_web::{post, web, HttpRequest, HttpResponse, Result as WebResult};
use std::sync::Arc;
use tracing::{error, info};

use crate::api::models::ChatRequest;
use crate::chat::{run_exchange, ClientMeta};
use crate::config::AppConfig;
use crate::llm::{models::ChatOptions, LlmProvider};
use crate::store::TranscriptStore;

#[post("/api/chat")]
pub async fn chat(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    provider: web::Data<Arc<dyn LlmProvider>>,
    store: web::Data<Arc<dyn TranscriptStore>>,
    body: web::Json<ChatRequest>,
) -> WebResult<HttpResponse> {
    let credential_present = config.provider_credential_present();
    info!("Provider API key configured: {}", credential_present);

    if !credential_present {
        // Full detail stays in the server log; the widget only sees a
        // generic message.
        error!("Rejecting chat request: no provider API key is configured");
        return Ok(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "An error occurred in the chat API. Please try again."
        })));
    }

    let meta = ClientMeta {
        ip: Some(header_or_unknown(&req, "x-forwarded-for")),
        user_agent: Some(header_or_unknown(&req, "user-agent")),
    };

    // Model and output cap are fixed per deployment, not caller-selectable.
    let options = ChatOptions {
        model: config.llm.openai.as_ref().map(|c| c.default_model.clone()),
        max_tokens: config.llm.openai.as_ref().map(|c| c.max_tokens),
    };

    let reply = run_exchange(
        provider.get_ref().as_ref(),
        store.get_ref().as_ref(),
        body.into_inner(),
        options,
        meta,
    )
    .await;

    Ok(HttpResponse::Ok().json(reply))
}

fn header_or_unknown(req: &HttpRequest, name: &str) -> String {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Converts JSON extractor failures into the `{ "error": ... }` shape the
/// widget expects, instead of actix's default plain-text 400.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let message = format!("Malformed request body: {}", err);
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
    )
    .into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(chat);
}
