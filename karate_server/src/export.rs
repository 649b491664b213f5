use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use karate_entities::domain::{Belt, UserRole};
use karate_entities::queries;
use karate_entities::schema::{organization, player, profile};
use sea_orm::prelude::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use karate_reports::sheet::{
    format_date, format_date_time, RegistrationSheet, SheetRow, HEADERS,
};
use karate_reports::{document, spreadsheet};

use crate::auth::ExtractAuthenticatedUser;
use crate::periods::parse_kind;
use crate::response::{handle_error, handle_error_dyn, APIError};
use crate::state::AppState;

const UNSPECIFIED: &str = "غير محدد";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Spreadsheet,
    Document,
    Csv,
}

impl ExportFormat {
    fn parse(format: &str) -> Result<ExportFormat, APIError> {
        match format {
            "spreadsheet" => Ok(ExportFormat::Spreadsheet),
            "document" => Ok(ExportFormat::Document),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err((
                StatusCode::NOT_FOUND,
                format!("Unknown export format {}", format),
            )
                .into()),
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "xlsx",
            ExportFormat::Document => "html",
            ExportFormat::Csv => "csv",
        }
    }

    fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Document => "text/html; charset=utf-8",
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExportQuery {
    pub period_id: Option<Uuid>,
    pub coach_id: Option<Uuid>,
}

pub async fn export_registrations_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path((kind, format)): Path<(String, String)>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, APIError> {
    let kind = parse_kind(&kind)?;
    let format = ExportFormat::parse(&format)?;

    let requester = user
        .profile(&db)
        .await
        .map_err(handle_error_dyn)?
        .ok_or(APIError::from((
            StatusCode::FORBIDDEN,
            "No profile for this user",
        )))?;
    let role: UserRole = requester
        .role
        .parse()
        .map_err(|_| APIError::from((StatusCode::FORBIDDEN, "Role is not authorized")))?;

    let coach_filter = match role {
        UserRole::Admin => query.coach_id,
        UserRole::Coach => {
            if query.coach_id.is_some() && query.coach_id != Some(user.uuid) {
                return Err(
                    (StatusCode::FORBIDDEN, "Coaches only export their own registrations").into(),
                );
            }
            Some(user.uuid)
        }
    };

    let mut registrations =
        queries::list_registrations(&db, kind, query.period_id, coach_filter)
            .await
            .map_err(handle_error)?;
    // Stored newest-first; the export numbers rows oldest-first.
    registrations.reverse();

    let periods: HashMap<Uuid, queries::Period> = queries::list_periods(&db, kind)
        .await
        .map_err(handle_error)?
        .into_iter()
        .map(|period| (period.uuid, period))
        .collect();
    let players: HashMap<Uuid, player::Model> = player::Entity::find()
        .all(&db)
        .await
        .map_err(handle_error)?
        .into_iter()
        .map(|player| (player.uuid, player))
        .collect();
    let profiles: HashMap<Uuid, profile::Model> = profile::Entity::find()
        .all(&db)
        .await
        .map_err(handle_error)?
        .into_iter()
        .map(|profile| (profile.uuid, profile))
        .collect();
    let organizations: HashMap<Uuid, organization::Model> = organization::Entity::find()
        .all(&db)
        .await
        .map_err(handle_error)?
        .into_iter()
        .map(|organization| (organization.uuid, organization))
        .collect();

    let rows = registrations
        .iter()
        .enumerate()
        .map(|(index, registration)| {
            let period = periods.get(&registration.period_id);
            let player = players.get(&registration.player_id);
            let organization = player
                .and_then(|player| player.organization_id)
                .and_then(|uuid| organizations.get(&uuid));
            SheetRow {
                sequence: index + 1,
                player_name: registration.player_name.clone(),
                belt_label: registration
                    .last_belt
                    .as_deref()
                    .map(Belt::label_for)
                    .unwrap_or_else(|| UNSPECIFIED.to_string()),
                birth_date: format_date(registration.birth_date),
                file_number: player
                    .and_then(|player| player.file_number)
                    .map(|number| number.to_string())
                    .unwrap_or_else(|| UNSPECIFIED.to_string()),
                coach_name: profiles
                    .get(&registration.coach_id)
                    .map(|profile| profile.full_name.clone())
                    .unwrap_or_else(|| UNSPECIFIED.to_string()),
                organization_name: organization
                    .map(|organization| organization.name.clone())
                    .unwrap_or_else(|| UNSPECIFIED.to_string()),
                period_name: period
                    .map(|period| period.name.clone())
                    .unwrap_or_else(|| UNSPECIFIED.to_string()),
                registered_at: format_date_time(registration.created_at),
                period_start: period
                    .map(|period| format_date(Some(period.start_date)))
                    .unwrap_or_else(|| UNSPECIFIED.to_string()),
                period_end: period
                    .map(|period| format_date(Some(period.end_date)))
                    .unwrap_or_else(|| UNSPECIFIED.to_string()),
            }
        })
        .collect();

    let requester_organization = requester
        .organization_id
        .and_then(|uuid| organizations.get(&uuid))
        .map(|organization| organization.name.clone());
    let sheet = RegistrationSheet::new(
        format!("اللاعبين المسجلين - {}", kind.arabic_label()),
        rows,
        Some(requester.full_name),
        requester_organization,
        chrono::Utc::now().naive_utc(),
    );

    render_sheet(&sheet, format)
}

fn render_sheet(sheet: &RegistrationSheet, format: ExportFormat) -> Result<Response, APIError> {
    let body: Vec<u8> = match format {
        ExportFormat::Spreadsheet => {
            spreadsheet::write_spreadsheet(sheet).map_err(handle_error)?
        }
        ExportFormat::Document => document::write_document(sheet)
            .map_err(handle_error)?
            .into_bytes(),
        ExportFormat::Csv => write_csv(sheet)?,
    };

    let file_name = sheet.file_name(format.extension(), chrono::Utc::now().date_naive());
    let mut response = body.into_response();
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static(format.content_type()),
    );
    response
        .headers_mut()
        .insert(CONTENT_DISPOSITION, content_disposition(&file_name, format));
    Ok(response)
}

/// The file name is Arabic, so the plain `filename` parameter carries an
/// ASCII fallback and `filename*` the real name per RFC 5987.
fn content_disposition(file_name: &str, format: ExportFormat) -> HeaderValue {
    let value = format!(
        "attachment; filename=\"registrations.{}\"; filename*=UTF-8''{}",
        format.extension(),
        percent_encode(file_name)
    );
    HeaderValue::from_str(&value)
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn write_csv(sheet: &RegistrationSheet) -> Result<Vec<u8>, APIError> {
    // A UTF-8 BOM so spreadsheet programs pick up the Arabic text.
    let mut writer = csv::Writer::from_writer(vec![0xEF, 0xBB, 0xBF]);
    writer.write_record(HEADERS).map_err(handle_error)?;
    for row in &sheet.rows {
        writer
            .write_record([
                row.sequence.to_string(),
                row.player_name.clone(),
                row.belt_label.clone(),
                row.birth_date.clone(),
                row.file_number.clone(),
                row.coach_name.clone(),
                row.organization_name.clone(),
                row.period_name.clone(),
                row.registered_at.clone(),
                row.period_start.clone(),
                row.period_end.clone(),
            ])
            .map_err(handle_error)?;
    }
    writer
        .into_inner()
        .map_err(|err| APIError::new(err.to_string()))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route(
        "/export/:kind/:format",
        get(export_registrations_handler),
    )
}
