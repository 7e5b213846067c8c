//! Axum route handlers for the Posts API.

use axum::{extract::State, Json};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppJson};
use crate::models::platform::Platform;
use crate::models::post::Post;
use crate::posts::service::PublishOutcome;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// `scheduledDateTime` wins; otherwise the editor's separate `postDate` /
/// `postTime` fields are combined as UTC. Empty strings count as unset.
/// Timestamps without an offset (`2025-04-08T14:30`) are read as UTC.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPostRequest {
    pub content: String,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    pub scheduled_date_time: Option<String>,
    pub post_date: Option<String>,
    pub post_time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<Post>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/posts
pub async fn handle_list_posts(State(state): State<AppState>) -> Json<PostListResponse> {
    Json(PostListResponse {
        posts: state.posts.list_posts().await,
    })
}

/// POST /api/posts
///
/// Expands inline directives, forwards to the webhook, then records the post.
pub async fn handle_publish(
    State(state): State<AppState>,
    AppJson(request): AppJson<PublishPostRequest>,
) -> Result<Json<PublishOutcome>, AppError> {
    let scheduled = resolve_schedule(&request)?;
    let outcome = state
        .posts
        .publish(&request.content, request.platforms, scheduled)
        .await?;
    Ok(Json(outcome))
}

/// Offset-less layouts accepted for `scheduledDateTime`, tried in order.
const LOCAL_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

fn resolve_schedule(request: &PublishPostRequest) -> Result<Option<DateTime<Utc>>, AppError> {
    if let Some(raw) = non_empty(&request.scheduled_date_time) {
        return parse_date_time(raw).map(Some);
    }

    let date = non_empty(&request.post_date);
    let time = non_empty(&request.post_time);

    let date = match (date, time) {
        (None, None) => return Ok(None),
        (None, Some(_)) => {
            return Err(AppError::Validation(
                "postTime requires a postDate".to_string(),
            ))
        }
        (Some(date), _) => NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            AppError::Validation(format!("postDate '{date}' is not YYYY-MM-DD"))
        })?,
    };

    let time = match time {
        Some(time) => NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .map_err(|_| AppError::Validation(format!("postTime '{time}' is not HH:MM")))?,
        None => NaiveTime::default(),
    };

    Ok(Some(date.and_time(time).and_utc()))
}

fn parse_date_time(raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            AppError::Validation(format!(
                "scheduledDateTime '{raw}' is not an ISO-8601 date and time"
            ))
        })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
