// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the scheduler REST API.
//!
//! Error mapping: `InvalidInput` renders 400, the not-found family 404,
//! everything else 500. Person ids supplied in write requests are validated
//! here and rejected with 400, matching the write/read asymmetry of the API.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use oncall_core::{
    export, generate_slots, ExportFormat, OnCallNow, OnCallSlot, OncallError, Person,
    ScheduleDefinition, SlotOverride,
};
use oncall_storage::queries::{people, pto, schedules, teams};
use oncall_storage::{Database, EnrichedSlot, PtoPeriod, Team};

use crate::server::GatewayState;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Domain error adapter for axum.
pub enum ApiError {
    Domain(OncallError),
    /// 404 with a free-form message, for lookups that have no single
    /// missing identifier (e.g. "no schedule for team 3 in 2025").
    NotFound(String),
}

impl From<OncallError> for ApiError {
    fn from(err: OncallError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Domain(err) => {
                let status = match &err {
                    OncallError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                    e if e.is_not_found() => StatusCode::NOT_FOUND,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!(error = %err, "request failed");
                }
                (status, err.to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Request body for POST /v1/schedules/teams/{team_id}/generate.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub year: i32,
    #[serde(default = "default_rotation_days")]
    pub rotation_days: i64,
    #[serde(default)]
    pub week_starts_on: u8,
    #[serde(default)]
    pub custom_start_date: Option<NaiveDate>,
    /// Explicit roster override; absent means the team membership roster.
    #[serde(default)]
    pub person_ids: Option<Vec<i64>>,
    #[serde(default = "default_true")]
    pub assign_secondary: bool,
}

fn default_rotation_days() -> i64 {
    7
}

fn default_true() -> bool {
    true
}

/// A schedule definition together with its enriched slots.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub schedule: ScheduleDefinition,
    pub slots: Vec<EnrichedSlot>,
}

/// POST /v1/schedules/teams/{team_id}/generate
///
/// Resolves the roster, collects the team's leave for the year, generates
/// the rotation, and persists the definition and slots atomically.
pub async fn generate_schedule(
    State(state): State<GatewayState>,
    Path(team_id): Path<i64>,
    Json(body): Json<GenerateRequest>,
) -> ApiResult<Json<ScheduleResponse>> {
    let team = require_team(&state.db, team_id).await?;

    // An empty explicit roster falls back to the membership roster, the
    // same as an absent one.
    let roster = match body.person_ids.filter(|ids| !ids.is_empty()) {
        Some(ids) => {
            validate_person_ids(&state.db, &ids).await?;
            ids
        }
        None => team.member_ids,
    };

    let pto_index = pto::pto_index_for_team_year(&state.db, team_id, body.year).await?;
    let assignments = generate_slots(
        &roster,
        body.year,
        body.rotation_days,
        body.week_starts_on,
        body.custom_start_date,
        &pto_index,
        body.assign_secondary,
    )?;

    let definition = schedules::create_schedule(
        &state.db,
        team_id,
        body.year,
        body.rotation_days,
        body.week_starts_on,
        body.custom_start_date,
        &assignments,
    )
    .await?;
    let slots = schedules::get_slots_with_people(&state.db, definition.id).await?;

    tracing::info!(
        team_id,
        schedule_id = definition.id,
        year = body.year,
        slots = slots.len(),
        "schedule generated"
    );
    Ok(Json(ScheduleResponse {
        schedule: definition,
        slots,
    }))
}

/// GET /v1/schedules/{id}
pub async fn get_schedule(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ScheduleResponse>> {
    let definition = require_schedule(&state.db, id).await?;
    let slots = schedules::get_slots_with_people(&state.db, id).await?;
    Ok(Json(ScheduleResponse {
        schedule: definition,
        slots,
    }))
}

/// Query parameters selecting a team's schedule year.
#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

/// GET /v1/schedules/teams/{team_id}?year=
///
/// The latest definition for the team and year (current year when absent).
pub async fn get_team_schedule(
    State(state): State<GatewayState>,
    Path(team_id): Path<i64>,
    Query(query): Query<YearQuery>,
) -> ApiResult<Json<ScheduleResponse>> {
    require_team(&state.db, team_id).await?;
    let year = query.year.unwrap_or_else(|| Utc::now().year());

    let definition = schedules::latest_schedule_for_team_year(&state.db, team_id, year)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no schedule for team {team_id} in {year}")))?;

    let slots = schedules::get_slots_with_people(&state.db, definition.id).await?;
    Ok(Json(ScheduleResponse {
        schedule: definition,
        slots,
    }))
}

/// Request body for POST /v1/schedules/{id}/override.
#[derive(Debug, Deserialize)]
pub struct OverrideRequest {
    pub slot: i64,
    #[serde(default)]
    pub primary_person_id: Option<i64>,
    #[serde(default)]
    pub secondary_person_id: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// POST /v1/schedules/{id}/override
///
/// Merges the provided fields into one slot. Supplied person ids must
/// exist; an override may make primary and secondary the same person.
pub async fn override_slot(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
    Json(body): Json<OverrideRequest>,
) -> ApiResult<Json<OnCallSlot>> {
    require_schedule(&state.db, id).await?;

    let mut referenced = Vec::new();
    if let Some(pid) = body.primary_person_id {
        referenced.push(pid);
    }
    if let Some(pid) = body.secondary_person_id {
        referenced.push(pid);
    }
    validate_person_ids(&state.db, &referenced).await?;

    let patch = SlotOverride {
        primary_person_id: body.primary_person_id,
        secondary_person_id: body.secondary_person_id,
        notes: body.notes,
    };
    let updated = schedules::apply_override(&state.db, id, body.slot, &patch)
        .await?
        .ok_or(OncallError::SlotNotFound {
            schedule_id: id,
            slot: body.slot,
        })?;

    tracing::info!(schedule_id = id, slot = body.slot, "slot overridden");
    Ok(Json(updated))
}

/// Query parameters for temporal lookups.
#[derive(Debug, Deserialize)]
pub struct OnCallQuery {
    /// Reference date; today (UTC) when absent.
    pub date: Option<NaiveDate>,
    /// Year for team-level lookups; the reference date's year when absent.
    pub year: Option<i32>,
}

/// GET /v1/schedules/{id}/oncall-now?date=
pub async fn oncall_now_for_schedule(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
    Query(query): Query<OnCallQuery>,
) -> ApiResult<Json<OnCallNow>> {
    let definition = require_schedule(&state.db, id).await?;
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let result = compose_oncall_now(&state.db, definition, date).await?;
    Ok(Json(result))
}

/// GET /v1/schedules/teams/{team_id}/oncall-now?year=&date=
pub async fn oncall_now_for_team(
    State(state): State<GatewayState>,
    Path(team_id): Path<i64>,
    Query(query): Query<OnCallQuery>,
) -> ApiResult<Json<OnCallNow>> {
    require_team(&state.db, team_id).await?;
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let year = query.year.unwrap_or_else(|| date.year());

    let definition = schedules::latest_schedule_for_team_year(&state.db, team_id, year)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no schedule for team {team_id} in {year}")))?;

    let result = compose_oncall_now(&state.db, definition, date).await?;
    Ok(Json(result))
}

/// Join the covering slot with assignee display data.
async fn compose_oncall_now(
    db: &Database,
    definition: ScheduleDefinition,
    date: NaiveDate,
) -> Result<OnCallNow, ApiError> {
    let slot = schedules::slot_covering_date(db, definition.id, date)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "no on-call coverage on {date} in schedule {}",
                definition.id
            ))
        })?;

    let primary = people::get_person(db, slot.primary_person_id)
        .await?
        .ok_or(OncallError::PersonNotFound {
            person_id: slot.primary_person_id,
        })?;
    let secondary = match slot.secondary_person_id {
        Some(pid) => people::get_person(db, pid).await?,
        None => None,
    };

    Ok(OnCallNow {
        schedule: definition,
        slot,
        primary,
        secondary,
    })
}

/// Query parameters for export.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: String,
}

/// GET /v1/schedules/{id}/export?format=csv|md|ics
pub async fn export_schedule(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<Response> {
    let format = ExportFormat::parse(&query.format)?;
    require_schedule(&state.db, id).await?;

    let slots = schedules::get_slots_with_people(&state.db, id).await?;
    let payload = export::render(format, id, &slots)?;

    let mut response = ([(header::CONTENT_TYPE, format.content_type())], payload).into_response();
    if let Some(filename) = format.filename(id) {
        let value = format!("attachment; filename=\"{filename}\"");
        if let Ok(header_value) = value.parse() {
            response
                .headers_mut()
                .insert(header::CONTENT_DISPOSITION, header_value);
        }
    }
    Ok(response)
}

/// DELETE /v1/schedules/{id}
pub async fn delete_schedule(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !schedules::delete_schedule(&state.db, id).await? {
        return Err(OncallError::ScheduleNotFound { schedule_id: id }.into());
    }
    tracing::info!(schedule_id = id, "schedule deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/people
pub async fn list_people(State(state): State<GatewayState>) -> ApiResult<Json<Vec<Person>>> {
    Ok(Json(people::list_people(&state.db).await?))
}

/// GET /v1/teams
pub async fn list_teams(State(state): State<GatewayState>) -> ApiResult<Json<Vec<Team>>> {
    Ok(Json(teams::list_teams(&state.db).await?))
}

/// Request body for POST /v1/pto.
#[derive(Debug, Deserialize)]
pub struct PtoRequest {
    pub person_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
}

/// POST /v1/pto
pub async fn create_pto(
    State(state): State<GatewayState>,
    Json(body): Json<PtoRequest>,
) -> ApiResult<Json<PtoPeriod>> {
    validate_person_ids(&state.db, &[body.person_id]).await?;

    let id = pto::create_pto(
        &state.db,
        body.person_id,
        body.start_date,
        body.end_date,
        body.reason.as_deref(),
    )
    .await?;

    Ok(Json(PtoPeriod {
        id,
        person_id: body.person_id,
        start_date: body.start_date,
        end_date: body.end_date,
        reason: body.reason,
    }))
}

/// Query parameters for PTO listing.
#[derive(Debug, Deserialize)]
pub struct PtoListQuery {
    pub person_id: Option<i64>,
}

/// GET /v1/pto?person_id=
pub async fn list_pto(
    State(state): State<GatewayState>,
    Query(query): Query<PtoListQuery>,
) -> ApiResult<Json<Vec<PtoPeriod>>> {
    Ok(Json(pto::list_pto(&state.db, query.person_id).await?))
}

async fn require_team(db: &Database, team_id: i64) -> Result<Team, ApiError> {
    teams::get_team(db, team_id)
        .await?
        .ok_or(OncallError::TeamNotFound { team_id }.into())
}

async fn require_schedule(db: &Database, id: i64) -> Result<ScheduleDefinition, ApiError> {
    schedules::get_schedule(db, id)
        .await?
        .ok_or(OncallError::ScheduleNotFound { schedule_id: id }.into())
}

/// Reject write requests referencing unknown people with 400.
async fn validate_person_ids(db: &Database, ids: &[i64]) -> Result<(), ApiError> {
    for &id in ids {
        if people::get_person(db, id).await?.is_none() {
            return Err(OncallError::InvalidInput(format!("person {id} does not exist")).into());
        }
    }
    Ok(())
}
