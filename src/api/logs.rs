use actix_web::{get, web, HttpResponse, Result as WebResult};
use std::sync::Arc;
use tracing::info;

use crate::api::middleware::AdminTokenAuth;
use crate::api::models::LogQuery;
use crate::store::TranscriptStore;

#[get("")]
pub async fn get_logs(
    store: web::Data<Arc<dyn TranscriptStore>>,
    query: web::Query<LogQuery>,
) -> WebResult<HttpResponse> {
    match &query.id {
        Some(id) => {
            info!("Transcript lookup for conversation {}", id);
            match store.get_by_id(id) {
                Some(turn) => Ok(HttpResponse::Ok().json(turn)),
                None => Ok(HttpResponse::NotFound()
                    .json(serde_json::json!({ "error": "Log not found" }))),
            }
        }
        None => {
            info!("Transcript listing requested");
            Ok(HttpResponse::Ok().json(store.list_all()))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/logs")
            .wrap(AdminTokenAuth)
            .service(get_logs),
    );
}
