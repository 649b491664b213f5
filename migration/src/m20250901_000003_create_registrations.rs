use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden, Clone)]
enum ExamRegistration {
    Table,
    Uuid,
    PeriodId,
    PlayerId,
    CoachId,
    PlayerName,
    BirthDate,
    LastBelt,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum SecondaryRegistration {
    Table,
    Uuid,
    PeriodId,
    PlayerId,
    CoachId,
    PlayerName,
    BirthDate,
    LastBelt,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum TournamentRegistration {
    Table,
    Uuid,
    PeriodId,
    PlayerId,
    CoachId,
    PlayerName,
    BirthDate,
    LastBelt,
    CreatedAt,
}

struct RegistrationTable<T: Iden + Clone + 'static> {
    table: T,
    uuid: T,
    period_id: T,
    player_id: T,
    coach_id: T,
    player_name: T,
    birth_date: T,
    last_belt: T,
    created_at: T,
    unique_index_name: &'static str,
}

impl<T: Iden + Clone + 'static> RegistrationTable<T> {
    fn create(&self) -> TableCreateStatement {
        Table::create()
            .table(self.table.clone())
            .if_not_exists()
            .col(
                ColumnDef::new(self.uuid.clone())
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(self.period_id.clone()).uuid().not_null())
            .col(ColumnDef::new(self.player_id.clone()).uuid().not_null())
            .col(ColumnDef::new(self.coach_id.clone()).uuid().not_null())
            .col(ColumnDef::new(self.player_name.clone()).string().not_null())
            .col(ColumnDef::new(self.birth_date.clone()).date())
            .col(ColumnDef::new(self.last_belt.clone()).string_len(16))
            .col(
                ColumnDef::new(self.created_at.clone())
                    .date_time()
                    .not_null(),
            )
            .to_owned()
    }

    // One registration per (period, player, coach). The delete-by-match
    // toggle relies on this.
    fn unique_index(&self) -> IndexCreateStatement {
        Index::create()
            .table(self.table.clone())
            .name(self.unique_index_name)
            .col(self.period_id.clone())
            .col(self.player_id.clone())
            .col(self.coach_id.clone())
            .unique()
            .to_owned()
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let exam = RegistrationTable {
            table: ExamRegistration::Table,
            uuid: ExamRegistration::Uuid,
            period_id: ExamRegistration::PeriodId,
            player_id: ExamRegistration::PlayerId,
            coach_id: ExamRegistration::CoachId,
            player_name: ExamRegistration::PlayerName,
            birth_date: ExamRegistration::BirthDate,
            last_belt: ExamRegistration::LastBelt,
            created_at: ExamRegistration::CreatedAt,
            unique_index_name: "exam_registration_period_player_coach",
        };
        manager.create_table(exam.create()).await?;
        manager.create_index(exam.unique_index()).await?;

        let secondary = RegistrationTable {
            table: SecondaryRegistration::Table,
            uuid: SecondaryRegistration::Uuid,
            period_id: SecondaryRegistration::PeriodId,
            player_id: SecondaryRegistration::PlayerId,
            coach_id: SecondaryRegistration::CoachId,
            player_name: SecondaryRegistration::PlayerName,
            birth_date: SecondaryRegistration::BirthDate,
            last_belt: SecondaryRegistration::LastBelt,
            created_at: SecondaryRegistration::CreatedAt,
            unique_index_name: "secondary_registration_period_player_coach",
        };
        manager.create_table(secondary.create()).await?;
        manager.create_index(secondary.unique_index()).await?;

        let tournament = RegistrationTable {
            table: TournamentRegistration::Table,
            uuid: TournamentRegistration::Uuid,
            period_id: TournamentRegistration::PeriodId,
            player_id: TournamentRegistration::PlayerId,
            coach_id: TournamentRegistration::CoachId,
            player_name: TournamentRegistration::PlayerName,
            birth_date: TournamentRegistration::BirthDate,
            last_belt: TournamentRegistration::LastBelt,
            created_at: TournamentRegistration::CreatedAt,
            unique_index_name: "tournament_registration_period_player_coach",
        };
        manager.create_table(tournament.create()).await?;
        manager.create_index(tournament.unique_index()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TournamentRegistration::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SecondaryRegistration::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamRegistration::Table).to_owned())
            .await?;
        Ok(())
    }
}
