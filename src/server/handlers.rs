use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::pipeline::{PipelineResult, SymptomRequest};

use super::error::ApiError;
use super::AppState;

/// Body of `POST /api/symptom-checker`.
#[derive(Debug, Deserialize)]
pub struct SymptomCheckBody {
    #[serde(default)]
    pub symptom_description: String,
    #[serde(default)]
    pub language_code: Option<String>,
}

pub async fn check_symptoms(
    State(state): State<AppState>,
    Json(body): Json<SymptomCheckBody>,
) -> Result<Json<PipelineResult>, ApiError> {
    let request = SymptomRequest::new(body.symptom_description.trim(), body.language_code);
    let result = state.pipeline.run(request).await?;
    Ok(Json(result))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
