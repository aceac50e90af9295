//! HTTP surface of the notification service.

use crate::mailer::{EmailPayload, Mailer};
use crate::payload::{ItemFoundWebhook, ItemRecord, MessageRecord, MessageWebhook};
use crate::profiles::fetch_profile;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderName, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use recover_core::Result;
use recover_supabase::SupabaseClient;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, warn};

pub const DEFAULT_FRONTEND_URL: &str = "https://recover.app";

/// Shared state for the notification routes. Built once at startup; the
/// Supabase handle inside runs with whichever key the deployment provided
/// (the service key, for these lookups to see every profile row).
pub struct NotifyState {
    pub supabase: SupabaseClient,
    pub mailer: Mailer,
    pub frontend_url: String,
    /// When set, `/notify-item-found` requires a matching
    /// `x-function-secret` header.
    pub function_secret: Option<String>,
}

impl NotifyState {
    pub fn new(supabase: SupabaseClient, mailer: Mailer) -> Self {
        Self {
            supabase,
            mailer,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            function_secret: None,
        }
    }

    /// Build state with `FRONTEND_URL` and `FUNCTION_SECRET` read from the
    /// environment.
    pub fn from_env(supabase: SupabaseClient, mailer: Mailer) -> Self {
        let mut state = Self::new(supabase, mailer);
        if let Ok(url) = std::env::var("FRONTEND_URL") {
            state.frontend_url = url;
        }
        state.function_secret = std::env::var("FUNCTION_SECRET").ok();
        state
    }

    pub fn with_frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = url.into();
        self
    }

    pub fn with_function_secret(mut self, secret: impl Into<String>) -> Self {
        self.function_secret = Some(secret.into());
        self
    }
}

/// Create the notification service router.
pub fn create_app(state: Arc<NotifyState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-function-secret")])
        .allow_origin(AllowOrigin::any());

    Router::new()
        .route("/health", get(health_check))
        .route("/notify-message", post(notify_message))
        .route("/notify-item-found", post(notify_item_found))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

/// `POST /notify-message` — insert trigger on `messages`. Mails the
/// recipient about the new message.
async fn notify_message(
    State(state): State<Arc<NotifyState>>,
    Json(payload): Json<MessageWebhook>,
) -> Response {
    let Some(record) = payload.record else {
        return (StatusCode::BAD_REQUEST, "Missing record").into_response();
    };

    match handle_message(&state, record).await {
        Ok(response) => response,
        Err(err) => {
            error!(error = %err, "notify-message failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}

async fn handle_message(state: &NotifyState, record: MessageRecord) -> Result<Response> {
    let recipient = fetch_profile(&state.supabase, &record.receiver_id).await?;
    let Some(email) = recipient.and_then(|p| p.email).filter(|e| !e.is_empty()) else {
        warn!(receiver_id = %record.receiver_id, "notify-message: recipient not found or has no e-mail");
        return Ok((StatusCode::BAD_REQUEST, "Recipient not found").into_response());
    };

    // Sender lookup is best-effort; a missing profile still gets a mail out.
    let sender_name = match fetch_profile(&state.supabase, &record.sender_id).await {
        Ok(Some(profile)) => profile.name.filter(|n| !n.is_empty()),
        Ok(None) => None,
        Err(err) => {
            warn!(error = %err, "notify-message: sender lookup failed");
            None
        }
    }
    .unwrap_or_else(|| "um usuário".to_string());

    let message_text = record
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("(Mensagem sem texto ou com foto)");
    let chat_link = format!("{}/chat", state.frontend_url);
    let subject = format!("Nova mensagem de {}", sender_name);

    let text = format!(
        "Você recebeu uma nova mensagem de {sender_name}.\n\n\
         Conteúdo:\n{message_text}\n\n\
         Acesse o chat para responder: {chat_link}\n"
    );
    let html = format!(
        "<p>Você recebeu uma nova mensagem de <strong>{sender_name}</strong>.</p>\n\
         <p><strong>Conteúdo:</strong><br>{}</p>\n\
         <p><a href=\"{chat_link}\" target=\"_blank\" rel=\"noopener noreferrer\">Abrir chat</a></p>",
        escape_html(message_text)
    );

    state.mailer.send(&EmailPayload { to: email, subject, text, html: Some(html) }).await?;

    Ok((StatusCode::OK, Json(json!({"ok": true}))).into_response())
}

/// `POST /notify-item-found` — update trigger on `items`. Mails the owner
/// when the status transitions into `"found"`.
async fn notify_item_found(
    State(state): State<Arc<NotifyState>>,
    headers: HeaderMap,
    Json(payload): Json<ItemFoundWebhook>,
) -> Response {
    if let Some(secret) = &state.function_secret {
        let presented = headers.get("x-function-secret").and_then(|v| v.to_str().ok());
        if presented != Some(secret.as_str()) {
            return (StatusCode::FORBIDDEN, "Forbidden").into_response();
        }
    }

    let Some(record) = payload.record else {
        return (StatusCode::BAD_REQUEST, "Missing record").into_response();
    };

    // Only act when the row just transitioned to "found".
    let was_found = payload.old_record.as_ref().is_some_and(|old| old.is_found());
    if was_found || !record.is_found() {
        return (StatusCode::OK, "No change to found state").into_response();
    }

    match handle_item_found(&state, record).await {
        Ok(response) => response,
        Err(err) => {
            error!(error = %err, "notify-item-found failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}

async fn handle_item_found(state: &NotifyState, record: ItemRecord) -> Result<Response> {
    let owner = fetch_profile(&state.supabase, &record.owner_id).await?;
    let Some(email) = owner.and_then(|p| p.email).filter(|e| !e.is_empty()) else {
        warn!(owner_id = %record.owner_id, "notify-item-found: owner not found or has no e-mail");
        return Ok((StatusCode::BAD_REQUEST, "Owner not found").into_response());
    };

    let item_title = record.display_title();
    let item_link = format!("{}/item/{}", state.frontend_url, record.id);
    let subject = format!("Alguém sinalizou que encontrou: {}", item_title);

    let text = format!(
        "Boa notícia! Alguém sinalizou que encontrou o item: {item_title}.\n\n\
         Acesse o app para ver detalhes e combinar a entrega: {item_link}\n"
    );
    let html = format!(
        "<p>Boa notícia! Alguém sinalizou que encontrou o item: <strong>{}</strong>.</p>\n\
         <p><a href=\"{item_link}\" target=\"_blank\" rel=\"noopener noreferrer\">Abrir item</a></p>",
        escape_html(item_title)
    );

    state.mailer.send(&EmailPayload { to: email, subject, text, html: Some(html) }).await?;

    Ok((StatusCode::OK, Json(json!({"ok": true}))).into_response())
}

/// Escape text for interpolation into the HTML mail bodies.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"oi" & 'tchau'</b>"#),
            "&lt;b&gt;&quot;oi&quot; &amp; &#39;tchau&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("sem marcação"), "sem marcação");
    }
}
