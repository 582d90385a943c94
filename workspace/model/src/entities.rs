//! Root of the SeaORM entity modules: the `app_user` account table and the
//! `trails` table that carries each user's favorites.

pub mod experience;
pub mod trail;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::experience::Experience;
    pub use super::trail::Entity as Trail;
    pub use super::user::Entity as User;
}
