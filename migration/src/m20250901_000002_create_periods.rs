use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// The three period kinds keep separate, identically shaped tables.

#[derive(Iden, Clone)]
enum ExamPeriod {
    Table,
    Uuid,
    Name,
    StartDate,
    EndDate,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum SecondaryRegistrationPeriod {
    Table,
    Uuid,
    Name,
    StartDate,
    EndDate,
    CreatedAt,
}

#[derive(Iden, Clone)]
enum TournamentPeriod {
    Table,
    Uuid,
    Name,
    StartDate,
    EndDate,
    CreatedAt,
}

fn period_table<T: Iden + Clone + 'static>(
    table: T,
    uuid: T,
    name: T,
    start_date: T,
    end_date: T,
    created_at: T,
) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(uuid).uuid().not_null().primary_key())
        .col(ColumnDef::new(name).string().not_null())
        .col(ColumnDef::new(start_date).date().not_null())
        .col(ColumnDef::new(end_date).date().not_null())
        .col(ColumnDef::new(created_at).date_time().not_null())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(period_table(
                ExamPeriod::Table,
                ExamPeriod::Uuid,
                ExamPeriod::Name,
                ExamPeriod::StartDate,
                ExamPeriod::EndDate,
                ExamPeriod::CreatedAt,
            ))
            .await?;
        manager
            .create_table(period_table(
                SecondaryRegistrationPeriod::Table,
                SecondaryRegistrationPeriod::Uuid,
                SecondaryRegistrationPeriod::Name,
                SecondaryRegistrationPeriod::StartDate,
                SecondaryRegistrationPeriod::EndDate,
                SecondaryRegistrationPeriod::CreatedAt,
            ))
            .await?;
        manager
            .create_table(period_table(
                TournamentPeriod::Table,
                TournamentPeriod::Uuid,
                TournamentPeriod::Name,
                TournamentPeriod::StartDate,
                TournamentPeriod::EndDate,
                TournamentPeriod::CreatedAt,
            ))
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TournamentPeriod::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(SecondaryRegistrationPeriod::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(ExamPeriod::Table).to_owned())
            .await?;
        Ok(())
    }
}
