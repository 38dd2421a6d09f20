use crate::web::state::AppState;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<Uuid>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ClearRequest {
    pub session_id: Uuid,
}

pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/chat", web::post().to(chat))
            .route("/history", web::get().to(history))
            .route("/clear", web::post().to(clear))
            .route("/health", web::get().to(health)),
    );
}

/// POST /api/chat: send one message. Omitting session_id starts a new
/// conversation; its id comes back in the response.
async fn chat(state: web::Data<AppState>, req: web::Json<ChatRequest>) -> HttpResponse {
    let message = req.message.trim();
    if message.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "empty message" }));
    }

    let (session_id, session) = match req.session_id {
        Some(id) => match state.sessions.get(id).await {
            Some(session) => (id, session),
            None => {
                return HttpResponse::NotFound()
                    .json(json!({ "error": format!("unknown session: {}", id) }));
            }
        },
        None => state.sessions.create(state.provider.clone()).await,
    };

    let mut session = session.lock().await;
    match session.send(message).await {
        Ok(reply) => HttpResponse::Ok().json(ChatResponse { session_id, reply }),
        Err(err) => {
            // The user message stays in the transcript; the caller gets a
            // descriptive string instead of a bare failure.
            log::error!("session {}: completion failed: {}", session_id, err);
            HttpResponse::BadGateway().json(json!({
                "session_id": session_id,
                "error": err.to_string(),
            }))
        }
    }
}

/// GET /api/history?session_id=...: the transcript in conversation order.
async fn history(state: web::Data<AppState>, query: web::Query<SessionQuery>) -> HttpResponse {
    match state.sessions.get(query.session_id).await {
        Some(session) => {
            let session = session.lock().await;
            HttpResponse::Ok().json(json!({
                "session_id": query.session_id,
                "messages": session.history(),
            }))
        }
        None => HttpResponse::NotFound()
            .json(json!({ "error": format!("unknown session: {}", query.session_id) })),
    }
}

/// POST /api/clear: empty a conversation's transcript.
async fn clear(state: web::Data<AppState>, req: web::Json<ClearRequest>) -> HttpResponse {
    match state.sessions.get(req.session_id).await {
        Some(session) => {
            session.lock().await.clear();
            HttpResponse::Ok().json(json!({
                "session_id": req.session_id,
                "status": "cleared",
            }))
        }
        None => HttpResponse::NotFound()
            .json(json!({ "error": format!("unknown session: {}", req.session_id) })),
    }
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
