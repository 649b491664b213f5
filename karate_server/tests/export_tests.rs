mod common;

use chrono::NaiveDate;
use karate_entities::schema::{exam_period, exam_registration};
use karate_server::registrations::ToggleRegistrationRequest;
use sea_orm::{prelude::Uuid, ActiveModelTrait, DatabaseConnection, IntoActiveModel};
use tracing_test::traced_test;

use crate::common::{Fixture, FixtureOptions};

const EXAM_PERIOD: u128 = 600;

async fn seed_period(db: DatabaseConnection) {
    let period = exam_period::Model {
        uuid: Uuid::from_u128(EXAM_PERIOD),
        name: "Spring Exam".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        created_at: chrono::Utc::now().naive_utc(),
    };
    period.into_active_model().insert(&db).await.unwrap();
}

/// A registration made by the second mock coach, outside the API.
async fn seed_foreign_registration(db: &DatabaseConnection) {
    let registration = exam_registration::Model {
        uuid: Uuid::new_v4(),
        period_id: Uuid::from_u128(EXAM_PERIOD),
        player_id: Uuid::from_u128(2003),
        coach_id: Uuid::from_u128(101),
        player_name: "Player 4".to_string(),
        birth_date: NaiveDate::from_ymd_opt(2010, 1, 4),
        last_belt: Some("green".to_string()),
        created_at: chrono::Utc::now().naive_utc(),
    };
    registration.into_active_model().insert(db).await.unwrap();
}

async fn fixture_with_registrations(use_admin_account: bool, own_count: usize) -> Fixture {
    let mut fixture = Fixture::new_with_setup(
        FixtureOptions {
            mock_default_data: true,
            use_admin_account,
        },
        |db| async move {
            seed_period(db.clone()).await;
            seed_foreign_registration(&db).await;
        },
    )
    .await;

    if !use_admin_account {
        for index in 0..own_count {
            let response = fixture
                .post_json(
                    "/api/registrations/exam",
                    ToggleRegistrationRequest {
                        period_id: Uuid::from_u128(EXAM_PERIOD),
                        player_id: fixture.player_uuid(0, index),
                    },
                )
                .await;
            assert_eq!(response.status(), 200);
        }
    }
    fixture
}

#[tokio::test]
#[traced_test]
async fn test_spreadsheet_export_is_an_xlsx_file() {
    let mut fixture = fixture_with_registrations(false, 2).await;

    let mut response = fixture.get("/api/export/exam/spreadsheet").await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.header("content-type").unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = response.header("content-disposition").unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("filename*=UTF-8''"));

    let bytes = response.bytes().await;
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
#[traced_test]
async fn test_csv_export_row_count_matches_registrations() {
    let mut fixture = fixture_with_registrations(false, 2).await;

    let mut response = fixture.get("/api/export/exam/csv").await;
    assert_eq!(response.status(), 200);
    let text = response.text().await;
    assert!(text.starts_with('\u{feff}'));
    // One header line plus one line per own registration.
    assert_eq!(text.trim_end().lines().count(), 3);
    assert!(text.contains("Player 1"));
    assert!(!text.contains("Player 4"));
}

#[tokio::test]
#[traced_test]
async fn test_admin_export_covers_all_coaches() {
    let mut fixture = fixture_with_registrations(true, 0).await;

    let mut response = fixture.get("/api/export/exam/csv").await;
    assert_eq!(response.status(), 200);
    let text = response.text().await;
    assert_eq!(text.trim_end().lines().count(), 2);
    assert!(text.contains("Player 4"));
    assert!(text.contains("Coach 2"));
}

#[tokio::test]
#[traced_test]
async fn test_document_export_lists_every_registration() {
    let mut fixture = fixture_with_registrations(false, 3).await;

    let mut response = fixture.get("/api/export/exam/document").await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.header("content-type").unwrap(),
        "text/html; charset=utf-8"
    );
    let html = response.text().await;
    assert!(html.contains("dir=\"rtl\""));
    for name in ["Player 1", "Player 2", "Player 3"] {
        assert!(html.contains(name), "missing {}", name);
    }
}

#[tokio::test]
#[traced_test]
async fn test_empty_export_still_renders() {
    let mut fixture = fixture_with_registrations(false, 0).await;

    let mut response = fixture.get("/api/export/exam/csv").await;
    assert_eq!(response.status(), 200);
    let text = response.text().await;
    assert_eq!(text.trim_end().lines().count(), 1);

    let mut response = fixture.get("/api/export/exam/spreadsheet").await;
    assert_eq!(response.status(), 200);
    assert!(response.bytes().await.starts_with(b"PK"));
}

#[tokio::test]
#[traced_test]
async fn test_coach_can_not_export_other_coach() {
    let mut fixture = fixture_with_registrations(false, 1).await;
    let other_coach = fixture.coach_uuid(1);

    let response = fixture
        .get(&format!("/api/export/exam/csv?coach_id={}", other_coach))
        .await;
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[traced_test]
async fn test_unknown_export_format_is_not_found() {
    let mut fixture = fixture_with_registrations(false, 0).await;
    let response = fixture.get("/api/export/exam/pdf").await;
    assert_eq!(response.status(), 404);
}
