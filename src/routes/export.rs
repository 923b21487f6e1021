use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::services::export_service::{ExportService, XLSX_CONTENT_TYPE};
use crate::{error::Result, AppState};

/// Export every salary record as XLSX
pub async fn export_salaries(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.salary_service.list_all().await?;
    let buffer = ExportService::generate_salaries_xlsx(&users)?;

    let filename = format!(
        "salaries_export_{}.xlsx",
        chrono::Utc::now().format("%Y%m%d_%H%M")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
