use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 click_events 表（只追加，不更新）
        manager
            .create_table(
                Table::create()
                    .table(ClickEvent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClickEvent::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClickEvent::LinkId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ClickEvent::ClickedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClickEvent::VisitorId)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(ClickEvent::IpAddress).string_len(45).null())
                    .col(
                        ColumnDef::new(ClickEvent::UserAgent)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ClickEvent::Referrer)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ClickEvent::AcceptLanguage)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_click_events_link")
                            .from(ClickEvent::Table, ClickEvent::LinkId)
                            .to(ShortLink::Table, ShortLink::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 统计查询按 link_id 聚合
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_click_events_link")
                    .table(ClickEvent::Table)
                    .col(ClickEvent::LinkId)
                    .to_owned(),
            )
            .await?;

        // 唯一访客统计（link_id + visitor_id）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_click_events_link_visitor")
                    .table(ClickEvent::Table)
                    .col(ClickEvent::LinkId)
                    .col(ClickEvent::VisitorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_click_events_link_visitor")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_click_events_link").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ClickEvent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ClickEvent {
    #[sea_orm(iden = "click_events")]
    Table,
    Id,
    LinkId,
    ClickedAt,
    VisitorId,
    IpAddress,
    UserAgent,
    Referrer,
    AcceptLanguage,
}

#[derive(DeriveIden)]
enum ShortLink {
    #[sea_orm(iden = "short_links")]
    Table,
    Id,
}
