//! Contact form submission.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::http::server::AppState;
use crate::store::NewLead;

/// Public contact form payload.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub message: String,
    /// Honeypot. Hidden from humans by the frontend; bots fill it.
    #[serde(default)]
    pub website: String,
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Response {
    // Honeypot tripped: answer exactly like a success so the bot learns
    // nothing, but store nothing.
    if !form.website.trim().is_empty() {
        tracing::debug!("Honeypot field filled, discarding submission");
        return (StatusCode::OK, Json(json!({ "ok": true }))).into_response();
    }

    let name = form.name.trim();
    let email = form.email.trim();
    let message = form.message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return validation_error("name, email and message are required");
    }
    if !is_plausible_email(email) {
        return validation_error("email address is not valid");
    }
    let max_len = state.config.load().contact.max_message_len;
    if message.chars().count() > max_len {
        return validation_error("message is too long");
    }

    let lead = state.leads.insert(NewLead {
        name: name.to_string(),
        email: email.to_string(),
        phone: form.phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
        company: form
            .company
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        message: message.to_string(),
    });
    state.sink.notify_lead(&lead);

    (StatusCode::OK, Json(json!({ "ok": true }))).into_response()
}

fn validation_error(message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": message })),
    )
        .into_response()
}

/// Cheap shape check; real verification happens when a reply is sent.
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_plausible_email("claire@example.fr"));
        assert!(is_plausible_email("a.b+tag@sub.example.com"));
        assert!(!is_plausible_email("claire"));
        assert!(!is_plausible_email("@example.fr"));
        assert!(!is_plausible_email("claire@"));
        assert!(!is_plausible_email("claire@localhost"));
        assert!(!is_plausible_email("claire@.fr"));
    }
}
