//! Click event entity, one row per visit to a short link

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "click_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTimeUtc,
    /// Cookie-derived visitor identifier, empty when the cookie was unusable
    pub visitor_id: String,
    pub ip_address: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub user_agent: String,
    #[sea_orm(column_type = "Text")]
    pub referrer: String,
    pub accept_language: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::short_link::Entity",
        from = "Column::LinkId",
        to = "super::short_link::Column::Id",
        on_delete = "Cascade"
    )]
    Link,
}

impl Related<super::short_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Link.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
