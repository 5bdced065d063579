//! HTTP request handlers

use std::io::Write;
use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use finbaba_core::SavingsGoal;
use finbaba_ingest::{ingest_path, tabular::parse_date, Ingested};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{AppError, AppState};

/// Extensions the upload endpoint accepts
const ALLOWED_EXTENSIONS: &[&str] = &["csv", "pdf", "xlsx", "xls"];

const DEFAULT_USER: &str = "default";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub data: Ingested,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDataResponse {
    #[serde(flatten)]
    pub data: Ingested,
    pub savings_goals: Vec<SavingsGoal>,
}

#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub success: bool,
    pub goal: SavingsGoal,
}

/// A number that may arrive as JSON number or as a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    fn value(&self) -> Option<f64> {
        match self {
            Amount::Number(n) => Some(*n),
            Amount::Text(s) => s.trim().parse().ok(),
        }
        .filter(|v: &f64| v.is_finite())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub user_id: Option<String>,
    pub name: String,
    pub target: Amount,
    pub deadline: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    pub user_id: Option<String>,
    pub amount: Amount,
}

fn user_or_default(user_id: Option<String>) -> String {
    user_id
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_USER.to_string())
}

/// Extension of an uploaded file name, if it is one we accept
fn accepted_extension(file_name: &str) -> Option<String> {
    let ext = std::path::Path::new(file_name)
        .extension()?
        .to_str()?
        .to_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

fn too_large(max_upload_bytes: usize) -> AppError {
    AppError::payload_too_large(&format!(
        "File too large. Maximum size is {} MB",
        max_upload_bytes / 1024 / 1024
    ))
}

/// Body limit hits surface as 413, anything else as a malformed form
fn multipart_error(err: MultipartError, max_upload_bytes: usize, what: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(max_upload_bytes)
    } else {
        AppError::bad_request(&format!("Failed to read {}: {}", what, err.body_text()))
    }
}

/// Stage the upload on disk and run the pipeline on it. The staged file is
/// deleted when the guard drops, whether ingestion succeeded or not.
fn stage_and_ingest(dir: &std::path::Path, ext: &str, bytes: &[u8]) -> Result<Ingested, AppError> {
    let mut staged = tempfile::Builder::new()
        .prefix("finbaba-upload-")
        .suffix(&format!(".{}", ext))
        .tempfile_in(dir)?;
    staged.write_all(bytes)?;
    staged.flush()?;

    ingest_path(staged.path()).map_err(AppError::ingest)
}

/// POST /api/upload - Upload and process a bank statement
///
/// Expects multipart form with:
/// - bankStatement: CSV, PDF or Excel file (required)
/// - userId: user to store the result under (optional, defaults to "default")
pub async fn upload_statement(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut user_id: Option<String> = None;

    let limit = state.max_upload_bytes;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit, "form field"))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "bankStatement" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, limit, "file data"))?;
                upload = Some((file_name, bytes.to_vec()));
            }
            "userId" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, limit, "userId"))?;
                user_id = Some(value);
            }
            _ => {}
        }
    }

    let (file_name, bytes) = upload.ok_or_else(|| AppError::bad_request("No file uploaded"))?;
    let user_id = user_or_default(user_id);

    let Some(ext) = accepted_extension(&file_name) else {
        warn!(file = %file_name, "Rejected upload with unsupported file type");
        return Err(AppError::bad_request(
            "Invalid file type. Only CSV, PDF, and Excel files are allowed.",
        ));
    };

    if bytes.len() > limit {
        return Err(too_large(limit));
    }

    // Extraction is synchronous and may touch disk
    let staging_dir = state.staging_dir.clone();
    let data =
        tokio::task::spawn_blocking(move || stage_and_ingest(&staging_dir, &ext, &bytes)).await??;

    info!(
        user = %user_id,
        file = %file_name,
        transactions = data.transactions.len(),
        "Processed bank statement"
    );
    state.store.replace_statement(&user_id, data.clone());

    Ok(Json(UploadResponse {
        success: true,
        message: "Bank statement processed successfully".to_string(),
        data,
    }))
}

/// GET /api/financial-data/:user_id
pub async fn get_financial_data(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<FinancialDataResponse>, AppError> {
    let record = state.store.get(&user_id);
    match record {
        Some(record) => match record.statement {
            Some(data) => Ok(Json(FinancialDataResponse {
                data,
                savings_goals: record.savings_goals,
            })),
            None => Err(AppError::not_found("No data found for user")),
        },
        None => Err(AppError::not_found("No data found for user")),
    }
}

/// POST /api/savings-goal
pub async fn create_savings_goal(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateGoalRequest>,
) -> Result<Json<GoalResponse>, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("Goal name is required"));
    }

    let target = req
        .target
        .value()
        .ok_or_else(|| AppError::bad_request("Invalid goal target"))?;

    let deadline = match req.deadline.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            parse_date(raw)
                .ok_or_else(|| AppError::bad_request(&format!("Invalid deadline: {}", raw)))?,
        ),
    };

    let user_id = user_or_default(req.user_id);
    let goal = state
        .store
        .add_goal(&user_id, name, target, deadline)
        .map_err(|e| AppError::bad_request(&e.to_string()))?;

    Ok(Json(GoalResponse {
        success: true,
        goal,
    }))
}

/// PUT /api/savings-goal/:goal_id
pub async fn update_savings_goal(
    State(state): State<Arc<AppState>>,
    Path(goal_id): Path<u64>,
    Json(req): Json<UpdateGoalRequest>,
) -> Result<Json<GoalResponse>, AppError> {
    let amount = req
        .amount
        .value()
        .ok_or_else(|| AppError::bad_request("Invalid amount"))?;

    let user_id = user_or_default(req.user_id);
    let goal = state
        .store
        .update_goal(&user_id, goal_id, amount)
        .map_err(|e| AppError::bad_request(&e.to_string()))?
        .ok_or_else(|| AppError::not_found("Goal not found"))?;

    if goal.is_complete() {
        info!(user = %user_id, goal = goal.id, "Savings goal reached");
    } else {
        info!(
            user = %user_id,
            goal = goal.id,
            progress = format!("{:.1}%", goal.progress_pct()),
            "Updated savings goal"
        );
    }

    Ok(Json(GoalResponse {
        success: true,
        goal,
    }))
}

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "message": "Finbaba API is running"
    }))
}
