use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create app_user table. Username carries no unique key.
        manager
            .create_table(
                Table::create()
                    .table(AppUser::Table)
                    .if_not_exists()
                    .col(pk_auto(AppUser::UserId))
                    .col(string_null(AppUser::Username))
                    .col(string_null(AppUser::Password))
                    .col(string_null(AppUser::City))
                    .col(string_null(AppUser::State))
                    .col(string_len_null(AppUser::Experience, 20))
                    .to_owned(),
            )
            .await?;

        // Create trails table. Rows are removed explicitly before their user.
        manager
            .create_table(
                Table::create()
                    .table(Trails::Table)
                    .if_not_exists()
                    .col(pk_auto(Trails::TrailId))
                    .col(integer(Trails::UserId))
                    .col(string_null(Trails::AppId))
                    .col(string_null(Trails::Name))
                    .col(double_null(Trails::TrailLength))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trails_user")
                            .from(Trails::Table, Trails::UserId)
                            .to(AppUser::Table, AppUser::UserId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trails_user_id")
                    .table(Trails::Table)
                    .col(Trails::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AppUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AppUser {
    Table,
    UserId,
    Username,
    Password,
    City,
    State,
    Experience,
}

#[derive(DeriveIden)]
enum Trails {
    Table,
    TrailId,
    UserId,
    AppId,
    Name,
    TrailLength,
}
