use sea_orm::entity::prelude::*;

/// A trail a user has favorited.
/// This side owns the relationship through `user_id`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trails")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub trail_id: i32,
    /// The user who favorited this trail.
    pub user_id: i32,
    /// Identifier of the trail at the external trail provider.
    pub app_id: Option<String>,
    pub name: Option<String>,
    /// Length of the hiking route, in miles.
    pub trail_length: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
