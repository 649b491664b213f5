use chrono::NaiveDate;
use karate_entities::domain::{PeriodKind, UserRole};
use karate_entities::prelude::*;
use karate_entities::{mock, queries, schema};
use migration::MigratorTrait;
use sea_orm::prelude::Uuid;
use sea_orm::{Database, DatabaseConnection, EntityTrait, ModelTrait};

async fn set_up_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_active_period_boundaries_are_inclusive() {
    let db = set_up_db().await;
    let period = mock::set_up_mock_period(
        &db,
        PeriodKind::Exam,
        "Spring Exam",
        date(2026, 3, 1),
        date(2026, 3, 10),
    )
    .await
    .unwrap();

    for day in [date(2026, 3, 1), date(2026, 3, 5), date(2026, 3, 10)] {
        let active = queries::find_active_period(&db, PeriodKind::Exam, day)
            .await
            .unwrap();
        assert_eq!(active.as_ref().map(|p| p.uuid), Some(period.uuid));
    }
}

#[tokio::test]
async fn test_no_active_period_outside_all_ranges() {
    let db = set_up_db().await;
    mock::set_up_mock_period(
        &db,
        PeriodKind::Exam,
        "Spring Exam",
        date(2026, 3, 1),
        date(2026, 3, 10),
    )
    .await
    .unwrap();

    for day in [date(2026, 2, 28), date(2026, 3, 11)] {
        let active = queries::find_active_period(&db, PeriodKind::Exam, day)
            .await
            .unwrap();
        assert!(active.is_none());
    }
}

#[tokio::test]
async fn test_overlapping_active_periods_are_an_error() {
    let db = set_up_db().await;
    mock::set_up_mock_period(
        &db,
        PeriodKind::Tournament,
        "Cup A",
        date(2026, 5, 1),
        date(2026, 5, 20),
    )
    .await
    .unwrap();
    mock::set_up_mock_period(
        &db,
        PeriodKind::Tournament,
        "Cup B",
        date(2026, 5, 10),
        date(2026, 5, 30),
    )
    .await
    .unwrap();

    let result = queries::find_active_period(&db, PeriodKind::Tournament, date(2026, 5, 15)).await;
    assert!(matches!(
        result,
        Err(QueryError::AmbiguousActivePeriod {
            kind: PeriodKind::Tournament
        })
    ));
}

#[tokio::test]
async fn test_period_kinds_do_not_interfere() {
    let db = set_up_db().await;
    mock::set_up_mock_period(
        &db,
        PeriodKind::Exam,
        "Exam",
        date(2026, 3, 1),
        date(2026, 3, 10),
    )
    .await
    .unwrap();

    let active = queries::find_active_period(&db, PeriodKind::Secondary, date(2026, 3, 5))
        .await
        .unwrap();
    assert!(active.is_none());
}

#[tokio::test]
async fn test_register_then_unregister_restores_table() {
    let db = set_up_db().await;
    let data = mock::set_up_mock_data(&db, Default::default()).await.unwrap();
    let period = mock::set_up_mock_period(
        &db,
        PeriodKind::Exam,
        "Exam",
        date(2026, 3, 1),
        date(2026, 3, 10),
    )
    .await
    .unwrap();

    let coach = data.coach_uuids[0];
    let player = data.player_uuids[0];

    let before = queries::list_registrations(&db, PeriodKind::Exam, Some(period.uuid), None)
        .await
        .unwrap();
    assert_eq!(before.len(), 0);

    queries::insert_registration(
        &db,
        PeriodKind::Exam,
        NewRegistration {
            period_id: period.uuid,
            player_id: player,
            coach_id: coach,
            player_name: "Player 1".to_string(),
            birth_date: Some(date(2010, 1, 1)),
            last_belt: Some("white".to_string()),
        },
    )
    .await
    .unwrap();

    let deleted = queries::delete_registration(&db, PeriodKind::Exam, period.uuid, player, coach)
        .await
        .unwrap();
    assert!(deleted);

    let after = queries::list_registrations(&db, PeriodKind::Exam, Some(period.uuid), None)
        .await
        .unwrap();
    assert_eq!(after.len(), 0);
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let db = set_up_db().await;
    let data = mock::set_up_mock_data(&db, Default::default()).await.unwrap();
    let period = mock::set_up_mock_period(
        &db,
        PeriodKind::Exam,
        "Exam",
        date(2026, 3, 1),
        date(2026, 3, 10),
    )
    .await
    .unwrap();

    let new = NewRegistration {
        period_id: period.uuid,
        player_id: data.player_uuids[0],
        coach_id: data.coach_uuids[0],
        player_name: "Player 1".to_string(),
        birth_date: None,
        last_belt: None,
    };

    queries::insert_registration(&db, PeriodKind::Exam, new.clone())
        .await
        .unwrap();
    let second = queries::insert_registration(&db, PeriodKind::Exam, new).await;
    assert!(second.is_err());
}

#[tokio::test]
async fn test_coach_roster_isolation() {
    let db = set_up_db().await;
    let options = mock::MockOption {
        num_coaches: 2,
        players_per_coach: 3,
        ..Default::default()
    };
    let per = options.players_per_coach;
    let data = mock::set_up_mock_data(&db, options).await.unwrap();

    let roster_a = queries::visible_players(&db, UserRole::Coach, data.coach_uuids[0])
        .await
        .unwrap();
    let roster_b = queries::visible_players(&db, UserRole::Coach, data.coach_uuids[1])
        .await
        .unwrap();

    assert_eq!(roster_a.len(), 3);
    assert_eq!(roster_b.len(), 3);
    assert!(roster_a.iter().all(|p| p.coach_id == data.coach_uuids[0]));
    assert!(roster_b.iter().all(|p| p.coach_id == data.coach_uuids[1]));

    let expected_a: Vec<Uuid> = data.players_of(per, 0).to_vec();
    let mut actual_a: Vec<Uuid> = roster_a.iter().map(|p| p.uuid).collect();
    actual_a.sort();
    let mut expected_a = expected_a;
    expected_a.sort();
    assert_eq!(actual_a, expected_a);
}

#[tokio::test]
async fn test_admin_sees_all_players() {
    let db = set_up_db().await;
    let data = mock::set_up_mock_data(
        &db,
        mock::MockOption {
            num_coaches: 2,
            players_per_coach: 3,
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let all = queries::visible_players(&db, UserRole::Admin, data.coach_uuids[0])
        .await
        .unwrap();
    assert_eq!(all.len(), 6);
}

#[tokio::test]
async fn test_deleting_organization_leaves_players_dangling() {
    let db = set_up_db().await;
    let data = mock::set_up_mock_data(&db, Default::default()).await.unwrap();

    let organization = schema::organization::Entity::find_by_id(data.organization_uuids[0])
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    organization.delete(&db).await.unwrap();

    // No client-side cascade: the players stay, with a dangling reference.
    let players = queries::coach_roster(&db, data.coach_uuids[0]).await.unwrap();
    assert_eq!(players.len(), 3);
    assert!(players
        .iter()
        .all(|p| p.organization_id == Some(data.organization_uuids[0])));
}
