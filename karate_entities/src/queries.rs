use chrono::NaiveDate;
use sea_orm::{prelude::*, ActiveValue, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::domain::{PeriodKind, UserRole};
use crate::schema;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// More than one period of one kind brackets today. There is no
    /// tie-break; the caller has to surface this as a data problem.
    #[error("more than one active {kind} period")]
    AmbiguousActivePeriod { kind: PeriodKind },
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// A registration period, independent of which of the three tables it
/// came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub uuid: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInput {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A registration row, independent of which of the three join tables it
/// came from. Carries the snapshot columns taken at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRow {
    pub uuid: Uuid,
    pub period_id: Uuid,
    pub player_id: Uuid,
    pub coach_id: Uuid,
    pub player_name: String,
    pub birth_date: Option<NaiveDate>,
    pub last_belt: Option<String>,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub period_id: Uuid,
    pub player_id: Uuid,
    pub coach_id: Uuid,
    pub player_name: String,
    pub birth_date: Option<NaiveDate>,
    pub last_belt: Option<String>,
}

macro_rules! period_from_model {
    ($model:ty) => {
        impl From<$model> for Period {
            fn from(model: $model) -> Period {
                Period {
                    uuid: model.uuid,
                    name: model.name,
                    start_date: model.start_date,
                    end_date: model.end_date,
                    created_at: model.created_at,
                }
            }
        }
    };
}

period_from_model!(schema::exam_period::Model);
period_from_model!(schema::secondary_registration_period::Model);
period_from_model!(schema::tournament_period::Model);

macro_rules! registration_from_model {
    ($model:ty) => {
        impl From<$model> for RegistrationRow {
            fn from(model: $model) -> RegistrationRow {
                RegistrationRow {
                    uuid: model.uuid,
                    period_id: model.period_id,
                    player_id: model.player_id,
                    coach_id: model.coach_id,
                    player_name: model.player_name,
                    birth_date: model.birth_date,
                    last_belt: model.last_belt,
                    created_at: model.created_at,
                }
            }
        }
    };
}

registration_from_model!(schema::exam_registration::Model);
registration_from_model!(schema::secondary_registration::Model);
registration_from_model!(schema::tournament_registration::Model);

/// Dispatches a query body over the period/registration table pair of a
/// kind. The body sees the two schema modules under the names given as
/// `$period` and `$registration`.
macro_rules! with_kind_tables {
    ($kind:expr, $period:ident, $registration:ident, $body:block) => {
        match $kind {
            PeriodKind::Exam => {
                #[allow(unused_imports)]
                use crate::schema::exam_period as $period;
                #[allow(unused_imports)]
                use crate::schema::exam_registration as $registration;
                $body
            }
            PeriodKind::Secondary => {
                #[allow(unused_imports)]
                use crate::schema::secondary_registration_period as $period;
                #[allow(unused_imports)]
                use crate::schema::secondary_registration as $registration;
                $body
            }
            PeriodKind::Tournament => {
                #[allow(unused_imports)]
                use crate::schema::tournament_period as $period;
                #[allow(unused_imports)]
                use crate::schema::tournament_registration as $registration;
                $body
            }
        }
    };
}

pub async fn list_periods<C>(db: &C, kind: PeriodKind) -> Result<Vec<Period>, DbErr>
where
    C: ConnectionTrait,
{
    with_kind_tables!(kind, period, _registration, {
        let rows = period::Entity::find()
            .order_by_desc(period::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(Period::from).collect())
    })
}

pub async fn find_period<C>(db: &C, kind: PeriodKind, uuid: Uuid) -> Result<Option<Period>, DbErr>
where
    C: ConnectionTrait,
{
    with_kind_tables!(kind, period, _registration, {
        Ok(period::Entity::find_by_id(uuid)
            .one(db)
            .await?
            .map(Period::from))
    })
}

/// The period whose [start_date, end_date] range contains `today`, with
/// inclusive boundaries. At most one period per kind may be active;
/// overlapping ranges are an error, not a pick.
pub async fn find_active_period<C>(
    db: &C,
    kind: PeriodKind,
    today: NaiveDate,
) -> Result<Option<Period>, QueryError>
where
    C: ConnectionTrait,
{
    with_kind_tables!(kind, period, _registration, {
        let matching = period::Entity::find()
            .filter(
                period::Column::StartDate
                    .lte(today)
                    .and(period::Column::EndDate.gte(today)),
            )
            .limit(2)
            .all(db)
            .await?;
        if matching.len() > 1 {
            return Err(QueryError::AmbiguousActivePeriod { kind });
        }
        Ok(matching.into_iter().next().map(Period::from))
    })
}

pub async fn insert_period<C>(
    db: &C,
    kind: PeriodKind,
    input: PeriodInput,
) -> Result<Period, DbErr>
where
    C: ConnectionTrait,
{
    with_kind_tables!(kind, period, _registration, {
        let model = period::ActiveModel {
            uuid: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(input.name),
            start_date: ActiveValue::Set(input.start_date),
            end_date: ActiveValue::Set(input.end_date),
            created_at: ActiveValue::Set(chrono::Utc::now().naive_utc()),
        };
        Ok(model.insert(db).await?.into())
    })
}

pub async fn update_period<C>(
    db: &C,
    kind: PeriodKind,
    uuid: Uuid,
    input: PeriodInput,
) -> Result<Option<Period>, DbErr>
where
    C: ConnectionTrait,
{
    with_kind_tables!(kind, period, _registration, {
        let Some(existing) = period::Entity::find_by_id(uuid).one(db).await? else {
            return Ok(None);
        };
        let mut model: period::ActiveModel = existing.into();
        model.name = ActiveValue::Set(input.name);
        model.start_date = ActiveValue::Set(input.start_date);
        model.end_date = ActiveValue::Set(input.end_date);
        Ok(Some(model.update(db).await?.into()))
    })
}

/// Deletes exactly the period row. Registrations referencing it are left
/// in place.
pub async fn delete_period<C>(db: &C, kind: PeriodKind, uuid: Uuid) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    with_kind_tables!(kind, period, _registration, {
        let res = period::Entity::delete_by_id(uuid).exec(db).await?;
        Ok(res.rows_affected > 0)
    })
}

pub async fn list_registrations<C>(
    db: &C,
    kind: PeriodKind,
    period_id: Option<Uuid>,
    coach_id: Option<Uuid>,
) -> Result<Vec<RegistrationRow>, DbErr>
where
    C: ConnectionTrait,
{
    with_kind_tables!(kind, _period, registration, {
        let mut query = registration::Entity::find();
        if let Some(period_id) = period_id {
            query = query.filter(registration::Column::PeriodId.eq(period_id));
        }
        if let Some(coach_id) = coach_id {
            query = query.filter(registration::Column::CoachId.eq(coach_id));
        }
        let rows = query
            .order_by_desc(registration::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(RegistrationRow::from).collect())
    })
}

pub async fn find_registration<C>(
    db: &C,
    kind: PeriodKind,
    period_id: Uuid,
    player_id: Uuid,
    coach_id: Uuid,
) -> Result<Option<RegistrationRow>, DbErr>
where
    C: ConnectionTrait,
{
    with_kind_tables!(kind, _period, registration, {
        Ok(registration::Entity::find()
            .filter(
                registration::Column::PeriodId
                    .eq(period_id)
                    .and(registration::Column::PlayerId.eq(player_id))
                    .and(registration::Column::CoachId.eq(coach_id)),
            )
            .one(db)
            .await?
            .map(RegistrationRow::from))
    })
}

pub async fn insert_registration<C>(
    db: &C,
    kind: PeriodKind,
    new: NewRegistration,
) -> Result<RegistrationRow, DbErr>
where
    C: ConnectionTrait,
{
    with_kind_tables!(kind, _period, registration, {
        let model = registration::ActiveModel {
            uuid: ActiveValue::Set(Uuid::new_v4()),
            period_id: ActiveValue::Set(new.period_id),
            player_id: ActiveValue::Set(new.player_id),
            coach_id: ActiveValue::Set(new.coach_id),
            player_name: ActiveValue::Set(new.player_name),
            birth_date: ActiveValue::Set(new.birth_date),
            last_belt: ActiveValue::Set(new.last_belt),
            created_at: ActiveValue::Set(chrono::Utc::now().naive_utc()),
        };
        Ok(model.insert(db).await?.into())
    })
}

/// Deletes the row matching (period, player, coach). Returns whether a
/// row was removed.
pub async fn delete_registration<C>(
    db: &C,
    kind: PeriodKind,
    period_id: Uuid,
    player_id: Uuid,
    coach_id: Uuid,
) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    with_kind_tables!(kind, _period, registration, {
        let res = registration::Entity::delete_many()
            .filter(
                registration::Column::PeriodId
                    .eq(period_id)
                    .and(registration::Column::PlayerId.eq(player_id))
                    .and(registration::Column::CoachId.eq(coach_id)),
            )
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    })
}

/// The roster a coach sees: only players whose coach reference is the
/// coach's own id, ordered by name for display.
pub async fn coach_roster<C>(db: &C, coach_id: Uuid) -> Result<Vec<schema::player::Model>, DbErr>
where
    C: ConnectionTrait,
{
    schema::player::Entity::find()
        .filter(schema::player::Column::CoachId.eq(coach_id))
        .order_by_asc(schema::player::Column::FullName)
        .all(db)
        .await
}

/// Players visible to a role: a coach sees their own roster, an admin
/// sees everything.
pub async fn visible_players<C>(
    db: &C,
    role: UserRole,
    viewer: Uuid,
) -> Result<Vec<schema::player::Model>, DbErr>
where
    C: ConnectionTrait,
{
    match role {
        UserRole::Coach => coach_roster(db, viewer).await,
        UserRole::Admin => {
            schema::player::Entity::find()
                .order_by_desc(schema::player::Column::CreatedAt)
                .all(db)
                .await
        }
    }
}
