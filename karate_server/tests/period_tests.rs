mod common;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use karate_entities::queries::{Period, PeriodInput};
use tracing_test::traced_test;

use crate::common::{Fixture, FixtureOptions};

async fn admin_fixture() -> Fixture {
    Fixture::new(FixtureOptions {
        mock_default_data: true,
        use_admin_account: true,
    })
    .await
}

fn days_from_today(days: i64) -> chrono::NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

#[tokio::test]
#[traced_test]
async fn test_admin_creates_and_lists_periods() {
    let mut fixture = admin_fixture().await;

    let mut response = fixture
        .post_json(
            "/api/periods/exam",
            PeriodInput {
                name: "Spring Exam".to_string(),
                start_date: days_from_today(1),
                end_date: days_from_today(10),
            },
        )
        .await;
    assert_eq!(response.status(), 200);
    let created: Period = response.json().await;
    assert_eq!(created.name, "Spring Exam");

    let mut response = fixture.get("/api/periods/exam").await;
    assert_eq!(response.status(), 200);
    let periods: Vec<Period> = response.json().await;
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].uuid, created.uuid);
}

#[tokio::test]
#[traced_test]
async fn test_coach_can_not_manage_periods() {
    let mut fixture = Fixture::new(FixtureOptions {
        mock_default_data: true,
        ..Default::default()
    })
    .await;

    let response = fixture
        .post_json(
            "/api/periods/exam",
            PeriodInput {
                name: "Spring Exam".to_string(),
                start_date: days_from_today(1),
                end_date: days_from_today(10),
            },
        )
        .await;
    assert_eq!(response.status(), 403);

    let response = fixture.get("/api/periods/exam").await;
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[traced_test]
async fn test_period_can_not_end_before_it_starts() {
    let mut fixture = admin_fixture().await;

    let response = fixture
        .post_json(
            "/api/periods/exam",
            PeriodInput {
                name: "Backwards".to_string(),
                start_date: days_from_today(10),
                end_date: days_from_today(1),
            },
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[traced_test]
async fn test_update_and_delete_period() {
    let mut fixture = admin_fixture().await;

    let mut response = fixture
        .post_json(
            "/api/periods/tournament",
            PeriodInput {
                name: "Cup".to_string(),
                start_date: days_from_today(1),
                end_date: days_from_today(10),
            },
        )
        .await;
    let created: Period = response.json().await;

    let mut response = fixture
        .patch_json(
            &format!("/api/periods/tournament/{}", created.uuid),
            PeriodInput {
                name: "Summer Cup".to_string(),
                start_date: days_from_today(2),
                end_date: days_from_today(12),
            },
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated: Period = response.json().await;
    assert_eq!(updated.name, "Summer Cup");

    let response = fixture
        .delete(&format!("/api/periods/tournament/{}", created.uuid))
        .await;
    assert_eq!(response.status(), 200);

    let response = fixture
        .delete(&format!("/api/periods/tournament/{}", created.uuid))
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[traced_test]
async fn test_active_period_boundaries_are_inclusive() {
    let mut fixture = admin_fixture().await;

    // A period that ends today is still active today.
    let mut response = fixture
        .post_json(
            "/api/periods/exam",
            PeriodInput {
                name: "Ends Today".to_string(),
                start_date: days_from_today(-5),
                end_date: days_from_today(0),
            },
        )
        .await;
    assert_eq!(response.status(), 200);
    let created: Period = response.json().await;

    let mut response = fixture.get("/api/periods/exam/active").await;
    assert_eq!(response.status(), 200);
    let active: Option<Period> = response.json().await;
    assert_eq!(active.map(|p| p.uuid), Some(created.uuid));
}

#[tokio::test]
#[traced_test]
async fn test_no_active_period_outside_range() {
    let mut fixture = admin_fixture().await;

    let response = fixture
        .post_json(
            "/api/periods/exam",
            PeriodInput {
                name: "Past".to_string(),
                start_date: days_from_today(-10),
                end_date: days_from_today(-1),
            },
        )
        .await;
    assert_eq!(response.status(), 200);

    let mut response = fixture.get("/api/periods/exam/active").await;
    assert_eq!(response.status(), 200);
    let active: Option<Period> = response.json().await;
    assert!(active.is_none());
}

#[tokio::test]
#[traced_test]
async fn test_overlapping_active_periods_are_a_conflict() {
    let mut fixture = admin_fixture().await;

    for name in ["First", "Second"] {
        let response = fixture
            .post_json(
                "/api/periods/exam",
                PeriodInput {
                    name: name.to_string(),
                    start_date: days_from_today(-1),
                    end_date: days_from_today(1),
                },
            )
            .await;
        assert_eq!(response.status(), 200);
    }

    let response = fixture.get("/api/periods/exam/active").await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[traced_test]
async fn test_active_period_is_per_kind() {
    let mut fixture = admin_fixture().await;

    let response = fixture
        .post_json(
            "/api/periods/secondary",
            PeriodInput {
                name: "School Year".to_string(),
                start_date: days_from_today(-1),
                end_date: days_from_today(30),
            },
        )
        .await;
    assert_eq!(response.status(), 200);

    let mut response = fixture.get("/api/periods/secondary/active").await;
    let active: Option<Period> = response.json().await;
    assert_matches!(active, Some(_));

    let mut response = fixture.get("/api/periods/exam/active").await;
    let active: Option<Period> = response.json().await;
    assert_matches!(active, None);
}

#[tokio::test]
#[traced_test]
async fn test_unknown_kind_is_not_found() {
    let mut fixture = admin_fixture().await;
    let response = fixture.get("/api/periods/belt/active").await;
    assert_eq!(response.status(), 404);
}
