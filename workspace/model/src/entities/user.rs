use super::experience::Experience;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

/// An application account.
///
/// Every attribute is a plain public field. The favorited trails live in the
/// `trails` table, which holds the foreign key back to this row; see
/// [`crate::store`] for how they are fetched alongside a user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "app_user")]
pub struct Model {
    /// Generated by the database on insert and never changed afterwards.
    #[sea_orm(primary_key, column_name = "user_id")]
    pub id: i32,
    /// Login name. Not unique at the schema level.
    pub username: Option<String>,
    /// Stored exactly as given.
    pub password: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub experience: Option<Experience>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A user can favorite many trails.
    #[sea_orm(has_many = "super::trail::Entity")]
    Trail,
}

impl Related<super::trail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// A freshly registered, unsaved account.
    ///
    /// The id is left for the database to assign; location and experience are
    /// empty. Nothing is validated.
    pub fn register(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: NotSet,
            username: Set(Some(username.into())),
            password: Set(Some(password.into())),
            city: Set(None),
            state: Set(None),
            experience: Set(None),
        }
    }
}
