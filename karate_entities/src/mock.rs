use chrono::NaiveDate;
use faker_rand::en_us::company::CompanyName;
use faker_rand::en_us::names::FullName;
use sea_orm::{prelude::*, ActiveValue, ConnectionTrait};

use crate::domain::{Belt, OrganizationType, PeriodKind, UserRole};
use crate::schema;

/*
Deterministic uuid ranges:
Organizations: 500
Coaches: 100
Players: 2000 (players_per_coach per coach, contiguous)
Periods: 600 (exam), 610 (secondary), 620 (tournament)
*/

#[derive(Debug)]
pub struct MockOption {
    pub deterministic_uuids: bool,
    pub num_coaches: u32,
    pub players_per_coach: u32,
    pub use_random_names: bool,
}

impl Default for MockOption {
    fn default() -> Self {
        Self {
            deterministic_uuids: true,
            num_coaches: 2,
            players_per_coach: 3,
            use_random_names: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockData {
    pub organization_uuids: Vec<Uuid>,
    pub coach_uuids: Vec<Uuid>,
    pub player_uuids: Vec<Uuid>,
}

impl MockData {
    /// Players of one coach, in insertion order.
    pub fn players_of(&self, options_players_per_coach: u32, coach_index: usize) -> &[Uuid] {
        let per = options_players_per_coach as usize;
        &self.player_uuids[coach_index * per..(coach_index + 1) * per]
    }
}

fn mock_uuid(deterministic: bool, base: u128, offset: u128) -> Uuid {
    if deterministic {
        Uuid::from_u128(base + offset)
    } else {
        Uuid::new_v4()
    }
}

/// Inserts a small club structure: one organization per coach, each coach
/// with a roster of players cycling through the belt ranks.
pub async fn set_up_mock_data<C>(db: &C, options: MockOption) -> Result<MockData, DbErr>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now().naive_utc();
    let mut organization_uuids = Vec::new();
    let mut coach_uuids = Vec::new();
    let mut player_uuids = Vec::new();

    for coach_idx in 0..options.num_coaches {
        let organization_uuid = mock_uuid(options.deterministic_uuids, 500, coach_idx as u128);
        let organization_name = if options.use_random_names {
            rand::random::<CompanyName>().to_string()
        } else {
            format!("Organization {}", coach_idx + 1)
        };
        schema::organization::ActiveModel {
            uuid: ActiveValue::Set(organization_uuid),
            name: ActiveValue::Set(organization_name),
            organization_type: ActiveValue::Set(
                if coach_idx % 2 == 0 {
                    OrganizationType::Club
                } else {
                    OrganizationType::YouthCenter
                }
                .as_str()
                .to_string(),
            ),
            created_at: ActiveValue::Set(now),
        }
        .insert(db)
        .await?;
        organization_uuids.push(organization_uuid);

        let coach_uuid = mock_uuid(options.deterministic_uuids, 100, coach_idx as u128);
        let coach_name = if options.use_random_names {
            rand::random::<FullName>().to_string()
        } else {
            format!("Coach {}", coach_idx + 1)
        };
        schema::profile::ActiveModel {
            uuid: ActiveValue::Set(coach_uuid),
            full_name: ActiveValue::Set(coach_name),
            role: ActiveValue::Set(UserRole::Coach.as_str().to_string()),
            organization_id: ActiveValue::Set(Some(organization_uuid)),
            created_at: ActiveValue::Set(now),
        }
        .insert(db)
        .await?;
        coach_uuids.push(coach_uuid);

        for player_idx in 0..options.players_per_coach {
            let offset = (coach_idx * options.players_per_coach + player_idx) as u128;
            let player_uuid = mock_uuid(options.deterministic_uuids, 2000, offset);
            let player_name = if options.use_random_names {
                rand::random::<FullName>().to_string()
            } else {
                format!("Player {}", offset + 1)
            };
            let belt = Belt::ALL[offset as usize % Belt::ALL.len()];
            schema::player::ActiveModel {
                uuid: ActiveValue::Set(player_uuid),
                full_name: ActiveValue::Set(player_name),
                belt: ActiveValue::Set(belt.as_str().to_string()),
                birth_date: ActiveValue::Set(NaiveDate::from_ymd_opt(2010, 1, 1 + offset as u32 % 28)),
                file_number: ActiveValue::Set(Some(offset as i32 + 1)),
                coach_id: ActiveValue::Set(coach_uuid),
                organization_id: ActiveValue::Set(Some(organization_uuid)),
                created_at: ActiveValue::Set(now),
            }
            .insert(db)
            .await?;
            player_uuids.push(player_uuid);
        }
    }

    Ok(MockData {
        organization_uuids,
        coach_uuids,
        player_uuids,
    })
}

/// Inserts one period of the given kind with the given date range.
pub async fn set_up_mock_period<C>(
    db: &C,
    kind: PeriodKind,
    name: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<crate::queries::Period, DbErr>
where
    C: ConnectionTrait,
{
    crate::queries::insert_period(
        db,
        kind,
        crate::queries::PeriodInput {
            name: name.to_string(),
            start_date,
            end_date,
        },
    )
    .await
}
