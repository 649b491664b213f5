use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Organization {
    Table,
    Uuid,
    Name,
    OrganizationType,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Uuid,
    Email,
    PasswordHash,
}

#[derive(Iden)]
enum Profile {
    Table,
    Uuid,
    FullName,
    Role,
    OrganizationId,
    CreatedAt,
}

#[derive(Iden)]
enum Player {
    Table,
    Uuid,
    FullName,
    Belt,
    BirthDate,
    FileNumber,
    CoachId,
    OrganizationId,
    CreatedAt,
}

#[derive(Iden)]
enum UserAccessKey {
    Table,
    KeyHash,
    UserId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organization::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Organization::Uuid)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Organization::Name).string().not_null())
                    .col(
                        ColumnDef::new(Organization::OrganizationType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Organization::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Uuid)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(User::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(User::PasswordHash)
                            .string_len(120)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // A coach's profile shares its uuid with the login user.
        manager
            .create_table(
                Table::create()
                    .table(Profile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profile::Uuid)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Profile::FullName).string().not_null())
                    .col(ColumnDef::new(Profile::Role).string_len(16).not_null())
                    .col(ColumnDef::new(Profile::OrganizationId).uuid())
                    .col(ColumnDef::new(Profile::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Player::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Player::Uuid)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Player::FullName).string().not_null())
                    .col(ColumnDef::new(Player::Belt).string_len(16).not_null())
                    .col(ColumnDef::new(Player::BirthDate).date())
                    .col(ColumnDef::new(Player::FileNumber).integer())
                    .col(ColumnDef::new(Player::CoachId).uuid().not_null())
                    .col(ColumnDef::new(Player::OrganizationId).uuid())
                    .col(ColumnDef::new(Player::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Player::Table)
                    .name("player_coach_id")
                    .col(Player::CoachId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserAccessKey::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserAccessKey::KeyHash)
                            .string_len(120)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserAccessKey::UserId).uuid().not_null())
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk-user_access_key-user")
                            .from_tbl(UserAccessKey::Table)
                            .from_col(UserAccessKey::UserId)
                            .to_tbl(User::Table)
                            .to_col(User::Uuid)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserAccessKey::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Player::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profile::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Organization::Table).to_owned())
            .await?;
        Ok(())
    }
}
