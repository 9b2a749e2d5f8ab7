use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Recipes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Recipes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Recipes::UserId).uuid().not_null())
                    .col(ColumnDef::new(Recipes::Title).string().not_null())
                    .col(ColumnDef::new(Recipes::Ingredients).json_binary().not_null())
                    .col(ColumnDef::new(Recipes::Instructions).text().not_null())
                    .col(ColumnDef::new(Recipes::Image).string().not_null())
                    .col(ColumnDef::new(Recipes::Country).string().not_null())
                    .col(ColumnDef::new(Recipes::Likes).json_binary().not_null())
                    .col(ColumnDef::new(Recipes::Comments).json_binary().not_null())
                    .col(
                        ColumnDef::new(Recipes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // No ON DELETE action: user accounts are never deleted in
                    // this system, and recipes must not cascade away if that
                    // ever changes.
                    .foreign_key(
                        ForeignKey::create()
                            .from(Recipes::Table, Recipes::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Recipes::Table)
                    .col(Recipes::UserId)
                    .name("idx_recipes_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Recipes::Table)
                    .col(Recipes::CreatedAt)
                    .name("idx_recipes_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_recipes_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_recipes_user_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Recipes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
    UserId,
    Title,
    Ingredients,
    Instructions,
    Image,
    Country,
    Likes,
    Comments,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
