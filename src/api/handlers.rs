//! Page-facing handlers
//!
//! The page itself is static; these endpoints carry every piece of state
//! it renders. The page polls the assessment endpoint while the score
//! animation is running.

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::logic::controller::ViewState;
use crate::logic::form::{FieldKind, FieldSpec};
use crate::{AppResult, AppState};

/// One field as the page renders it
#[derive(Debug, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
    pub value: String,
}

impl FieldView {
    fn from_spec(spec: &'static FieldSpec, value: String) -> Self {
        let (kind, options) = match spec.kind {
            FieldKind::Int => ("int", None),
            FieldKind::Float => ("float", None),
            FieldKind::Categorical(opts) => ("select", Some(opts.to_vec())),
        };
        Self {
            name: spec.name,
            kind,
            options,
            unit: spec.unit,
            hint: spec.hint,
            value,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FormView {
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Deserialize)]
pub struct SetFieldRequest {
    pub value: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    timestamp: i64,
}

/// Health check
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

/// The static page
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// Field registry with current raw values, in display order
pub async fn get_form(State(state): State<AppState>) -> Json<FormView> {
    let fields = state
        .controller
        .fields()
        .into_iter()
        .map(|(spec, value)| FieldView::from_spec(spec, value))
        .collect();

    Json(FormView { fields })
}

/// Store one raw field value. Unknown field names are 404; anything else
/// is accepted untouched - validation happens at submission time.
pub async fn set_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Json(req): Json<SetFieldRequest>,
) -> AppResult<Json<FieldView>> {
    let spec = crate::logic::form::field_spec(&field)
        .ok_or_else(|| crate::AppError::UnknownField(field.clone()))?;

    state.controller.set_field(&field, req.value)?;
    let value = state.controller.field_value(&field);

    Ok(Json(FieldView::from_spec(spec, value)))
}

/// Run one submission cycle and return the fresh view state
pub async fn submit_assessment(State(state): State<AppState>) -> AppResult<Json<ViewState>> {
    let view = state.controller.submit().await?;
    Ok(Json(view))
}

/// Current view state (polled while the score animates)
pub async fn get_assessment(State(state): State<AppState>) -> Json<ViewState> {
    Json(state.controller.view())
}
