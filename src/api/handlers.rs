//! API request handlers

use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::server::AppState;
use crate::cli::{load_countries, run_conversion, GroupChoice};
use crate::core::CurrencyGroup;
use crate::error::GdpError;
use crate::excel::{default_output_path, ExcelExporter};
use crate::types::{ConvertedTable, ErrorRecord};

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Status for a request-level failure. Bad workbooks are the caller's problem.
pub fn error_status(err: &GdpError) -> StatusCode {
    match err {
        GdpError::DataFormat(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GdpError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => StatusCode::NOT_FOUND,
        GdpError::Config(_) | GdpError::Yaml(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure<T: Serialize + Default>(err: GdpError) -> (StatusCode, Json<ApiResponse<T>>) {
    warn!("request failed: {}", err);
    (error_status(&err), Json(ApiResponse::err(err.to_string())))
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

fn endpoint(path: &str, method: &str, description: &str) -> EndpointInfo {
    EndpointInfo {
        path: path.to_string(),
        method: method.to_string(),
        description: description.to_string(),
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(RootResponse {
        name: "gdpx API Server".to_string(),
        version: state.version.clone(),
        description: "Convert GDP workbooks to a common currency basis".to_string(),
        endpoints: vec![
            endpoint("/health", "GET", "Health check endpoint"),
            endpoint("/version", "GET", "Get server version"),
            endpoint("/api/v1/countries", "POST", "List countries in a GDP workbook"),
            endpoint("/api/v1/convert", "POST", "Convert a GDP workbook"),
        ],
    }))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
    }))
}

/// Countries request
#[derive(Deserialize)]
pub struct CountriesRequest {
    pub file_path: String,
}

/// Countries response: the options for the shared-currency selection
#[derive(Serialize, Default)]
pub struct CountriesResponse {
    pub countries: Vec<String>,
    /// Preset members present in this workbook
    pub default_selection: Vec<String>,
    pub reference_fx_row: String,
}

/// POST /api/v1/countries - List GDP row keys
pub async fn countries(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CountriesRequest>,
) -> impl IntoResponse {
    let path = PathBuf::from(&req.file_path);
    let config = &state.converter;

    match load_countries(&path, config) {
        Ok(gdp) => {
            let preset = CurrencyGroup::from_names(&config.shared_currency);
            let (selection, _) = preset.restrict_to(&gdp);
            (
                StatusCode::OK,
                Json(ApiResponse::ok(CountriesResponse {
                    countries: gdp.keys().map(String::from).collect(),
                    default_selection: selection.iter().map(String::from).collect(),
                    reference_fx_row: config.reference_fx_row.clone(),
                })),
            )
        }
        Err(e) => failure::<CountriesResponse>(e),
    }
}

/// Convert request
#[derive(Deserialize)]
pub struct ConvertRequest {
    pub file_path: String,
    /// Omitted: use the configured preset
    #[serde(default)]
    pub shared_currency: Option<Vec<String>>,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub include_errors_sheet: bool,
}

/// Convert response
#[derive(Serialize, Default)]
pub struct ConvertResponse {
    pub output_path: String,
    pub shared_currency: Vec<String>,
    pub ignored: Vec<String>,
    pub converted_count: usize,
    pub failed_count: usize,
    pub table: ConvertedTable,
    pub errors: Vec<ErrorRecord>,
}

/// POST /api/v1/convert - Convert a GDP workbook
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConvertRequest>,
) -> impl IntoResponse {
    let input = PathBuf::from(&req.file_path);
    let choice = match req.shared_currency {
        Some(names) if names.is_empty() => GroupChoice::Empty,
        Some(names) => GroupChoice::Names(names),
        None => GroupChoice::Preset,
    };

    let report = match run_conversion(&input, &choice, &state.converter) {
        Ok(report) => report,
        Err(e) => return failure::<ConvertResponse>(e),
    };

    let output = req
        .output_path
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(&input));
    if let Err(e) = ExcelExporter::new()
        .with_errors(req.include_errors_sheet)
        .export(&report.outcome, &output)
    {
        return failure::<ConvertResponse>(e);
    }

    info!(
        file = %req.file_path,
        converted = report.outcome.success_count(),
        failed = report.outcome.failure_count(),
        "converted workbook"
    );

    let converted_count = report.outcome.success_count();
    let failed_count = report.outcome.failure_count();
    let (table, errors) = report.outcome.into_parts();
    (
        StatusCode::OK,
        Json(ApiResponse::ok(ConvertResponse {
            output_path: output.display().to_string(),
            shared_currency: report.group.iter().map(String::from).collect(),
            ignored: report.ignored,
            converted_count,
            failed_count,
            table,
            errors,
        })),
    )
}
