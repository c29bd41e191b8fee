//! Log tail endpoint.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Lines returned when the query omits `lines`.
pub const DEFAULT_LINES: usize = 100;

/// Query parameters for `GET /log`.
///
/// Everything is optional and stringly-typed so missing or malformed values
/// get our own error messages instead of the extractor's rejection.
#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub filename: Option<String>,
    pub lines: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub filename: String,
    pub lines: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    pub results: Vec<String>,
    pub count: usize,
}

fn parse_lines(raw: Option<&str>) -> ApiResult<usize> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_LINES);
    };
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ApiError::BadRequest("lines must be a positive number".into()))
}

/// GET /log?filename=&lines=&keyword= — last N lines of a log file.
pub async fn get_log(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> ApiResult<Json<LogResponse>> {
    let filename = query
        .filename
        .filter(|f| !f.is_empty())
        .ok_or_else(|| ApiError::BadRequest("filename is required".into()))?;
    let lines = parse_lines(query.lines.as_deref())?;
    let keyword = query.keyword.filter(|k| !k.is_empty());

    let results = state
        .search
        .search(&filename, lines, keyword.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(filename = %filename, error = %e, "log search failed");
            ApiError::from(e)
        })?;

    let count = results.len();
    Ok(Json(LogResponse {
        filename,
        lines,
        keyword,
        results,
        count,
    }))
}
