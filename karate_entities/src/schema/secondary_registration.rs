use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "secondary_registration")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,
    pub period_id: Uuid,
    pub player_id: Uuid,
    pub coach_id: Uuid,
    pub player_name: String,
    pub birth_date: Option<Date>,
    pub last_belt: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::secondary_registration_period::Entity",
        from = "Column::PeriodId",
        to = "super::secondary_registration_period::Column::Uuid"
    )]
    Period,
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::PlayerId",
        to = "super::player::Column::Uuid"
    )]
    Player,
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::CoachId",
        to = "super::profile::Column::Uuid"
    )]
    Coach,
}

impl Related<super::secondary_registration_period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Period.def()
    }
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Coach.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
