use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::server::AppState;
use crate::store::{
    AnalyticsSummary, EmailTemplate, FaqEntry, Lead, LeadStatus, Project,
};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub leads: usize,
    pub rate_limited_clients: usize,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        leads: state.leads.count(),
        rate_limited_clients: state.limiter.tracked_clients(),
    })
}

// Leads (CRM)

#[derive(Deserialize)]
pub struct LeadStatusUpdate {
    pub status: LeadStatus,
}

pub async fn list_leads(State(state): State<AppState>) -> Json<Vec<Lead>> {
    Json(state.leads.list())
}

pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<LeadStatusUpdate>,
) -> Response {
    match state.leads.set_status(id, update.status) {
        Some(lead) => Json(lead).into_response(),
        None => (StatusCode::NOT_FOUND, "Lead not found").into_response(),
    }
}

pub async fn delete_lead(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    if state.leads.remove(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::NOT_FOUND, "Lead not found").into_response()
    }
}

// FAQ

#[derive(Deserialize)]
pub struct FaqPayload {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub position: u32,
}

pub async fn list_faq(State(state): State<AppState>) -> Json<Vec<FaqEntry>> {
    Json(state.content.list_faq())
}

pub async fn create_faq(
    State(state): State<AppState>,
    Json(payload): Json<FaqPayload>,
) -> Response {
    let entry = state
        .content
        .insert_faq(payload.question, payload.answer, payload.position);
    (StatusCode::CREATED, Json(entry)).into_response()
}

pub async fn update_faq(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FaqPayload>,
) -> Response {
    match state
        .content
        .update_faq(id, payload.question, payload.answer, payload.position)
    {
        Some(entry) => Json(entry).into_response(),
        None => (StatusCode::NOT_FOUND, "FAQ entry not found").into_response(),
    }
}

pub async fn delete_faq(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    if state.content.remove_faq(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::NOT_FOUND, "FAQ entry not found").into_response()
    }
}

// Projects

#[derive(Deserialize)]
pub struct ProjectPayload {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub position: u32,
}

impl ProjectPayload {
    fn into_project(self, id: Uuid) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            url: self.url,
            image_url: self.image_url,
            position: self.position,
        }
    }
}

pub async fn list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    Json(state.content.list_projects())
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<ProjectPayload>,
) -> Response {
    let project = state
        .content
        .insert_project(payload.into_project(Uuid::new_v4()));
    (StatusCode::CREATED, Json(project)).into_response()
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProjectPayload>,
) -> Response {
    match state.content.update_project(id, payload.into_project(id)) {
        Some(project) => Json(project).into_response(),
        None => (StatusCode::NOT_FOUND, "Project not found").into_response(),
    }
}

pub async fn delete_project(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    if state.content.remove_project(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::NOT_FOUND, "Project not found").into_response()
    }
}

// Email templates

#[derive(Deserialize)]
pub struct TemplatePayload {
    pub name: String,
    pub subject: String,
    pub body: String,
}

pub async fn list_templates(State(state): State<AppState>) -> Json<Vec<EmailTemplate>> {
    Json(state.content.list_templates())
}

pub async fn create_template(
    State(state): State<AppState>,
    Json(payload): Json<TemplatePayload>,
) -> Response {
    let template = state
        .content
        .insert_template(payload.name, payload.subject, payload.body);
    (StatusCode::CREATED, Json(template)).into_response()
}

pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TemplatePayload>,
) -> Response {
    match state
        .content
        .update_template(id, payload.name, payload.subject, payload.body)
    {
        Some(template) => Json(template).into_response(),
        None => (StatusCode::NOT_FOUND, "Template not found").into_response(),
    }
}

pub async fn delete_template(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    if state.content.remove_template(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::NOT_FOUND, "Template not found").into_response()
    }
}

// Analytics

pub async fn get_analytics(State(state): State<AppState>) -> Json<AnalyticsSummary> {
    Json(state.analytics.summary())
}
