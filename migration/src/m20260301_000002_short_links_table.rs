use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 short_links 表
        manager
            .create_table(
                Table::create()
                    .table(ShortLink::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShortLink::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ShortLink::OwnerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ShortLink::Title)
                            .string_len(120)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(ShortLink::OriginalUrl).text().not_null())
                    .col(ColumnDef::new(ShortLink::Slug).string_len(32).not_null())
                    .col(
                        ColumnDef::new(ShortLink::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ShortLink::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_short_links_owner")
                            .from(ShortLink::Table, ShortLink::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // slug 全局唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_links_slug")
                    .table(ShortLink::Table)
                    .col(ShortLink::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // dashboard 按 owner + 创建时间倒序列出
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_links_owner_created")
                    .table(ShortLink::Table)
                    .col(ShortLink::OwnerId)
                    .col(ShortLink::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_short_links_owner_created")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_short_links_slug").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ShortLink::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShortLink {
    #[sea_orm(iden = "short_links")]
    Table,
    Id,
    OwnerId,
    Title,
    OriginalUrl,
    Slug,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}
