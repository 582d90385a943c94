//! Data access for accounts and their favorited trails.
//!
//! Nothing here loads related rows behind the caller's back: every read takes a
//! [`FetchMode`], and deleting an account removes its trails inside the same
//! transaction as the account row.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, LoaderTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info, instrument, trace, warn};

use crate::entities::{experience::Experience, trail, user};
use crate::error::{Result, StoreError};

/// Whether favorited trails are loaded together with the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchMode {
    /// Trails are queried as part of the same call.
    #[default]
    Eager,
    /// Trails stay unloaded until [`UserAccount::load_favorites`] is called.
    Deferred,
}

/// A user together with its favorites, when they have been fetched.
#[derive(Clone, Debug, PartialEq)]
pub struct UserAccount {
    pub user: user::Model,
    /// `None` while the favorites have not been loaded.
    pub favorited_trails: Option<Vec<trail::Model>>,
}

impl UserAccount {
    fn unloaded(user: user::Model) -> Self {
        Self {
            user,
            favorited_trails: None,
        }
    }

    pub fn favorites(&self) -> Option<&[trail::Model]> {
        self.favorited_trails.as_deref()
    }

    /// Fetches the favorites if they are not loaded yet.
    pub async fn load_favorites<C: ConnectionTrait>(&mut self, db: &C) -> Result<&[trail::Model]> {
        if self.favorited_trails.is_none() {
            trace!("Loading deferred favorites for user {}", self.user.id);
            let trails = trails_of(db, &self.user).await?;
            self.favorited_trails = Some(trails);
        }
        Ok(self.favorited_trails.as_deref().unwrap_or_default())
    }
}

/// Profile fields to overwrite. The outer `None` leaves the stored value
/// untouched; `Some(None)` clears a nullable field.
#[derive(Clone, Debug, Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub password: Option<String>,
    pub city: Option<Option<String>>,
    pub state: Option<Option<String>>,
    pub experience: Option<Option<Experience>>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.experience.is_none()
    }

    /// Names of the fields that will change, for logging. Never includes values.
    fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.username.is_some() {
            names.push("username");
        }
        if self.password.is_some() {
            names.push("password");
        }
        if self.city.is_some() {
            names.push("city");
        }
        if self.state.is_some() {
            names.push("state");
        }
        if self.experience.is_some() {
            names.push("experience");
        }
        names
    }
}

/// A trail to add to a user's favorites.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewFavorite {
    pub app_id: Option<String>,
    pub name: Option<String>,
    pub trail_length: Option<f64>,
}

async fn trails_of<C: ConnectionTrait>(db: &C, user: &user::Model) -> Result<Vec<trail::Model>> {
    let trails = user
        .find_related(trail::Entity)
        .order_by_asc(trail::Column::TrailId)
        .all(db)
        .await?;
    Ok(trails)
}

async fn require_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<user::Model> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(StoreError::UserNotFound(user_id))
}

/// Saves a newly registered account. Its favorites are loaded and empty.
#[instrument(skip(db, password))]
pub async fn create_user<C: ConnectionTrait>(
    db: &C,
    username: String,
    password: String,
) -> Result<UserAccount> {
    trace!("Inserting new user");
    let user = user::ActiveModel::register(username, password).insert(db).await?;
    info!("Created user with ID: {}", user.id);

    Ok(UserAccount {
        user,
        favorited_trails: Some(Vec::new()),
    })
}

#[instrument(skip(db))]
pub async fn find_user<C: ConnectionTrait>(db: &C, user_id: i32, fetch: FetchMode) -> Result<UserAccount> {
    let user = require_user(db, user_id).await?;
    let mut account = UserAccount::unloaded(user);

    if fetch == FetchMode::Eager {
        account.load_favorites(db).await?;
    }

    debug!(
        "Found user {} with {} favorites loaded",
        user_id,
        account.favorites().map_or(0, |trails| trails.len())
    );
    Ok(account)
}

/// One page of users ordered by id. Pages start at 1; page 0 is treated as 1.
#[instrument(skip(db))]
pub async fn list_users<C: ConnectionTrait>(
    db: &C,
    page: u64,
    per_page: u64,
    fetch: FetchMode,
) -> Result<Vec<UserAccount>> {
    let users = user::Entity::find()
        .order_by_asc(user::Column::Id)
        .paginate(db, per_page.max(1))
        .fetch_page(page.saturating_sub(1))
        .await?;
    debug!("Fetched {} users", users.len());

    let accounts = match fetch {
        FetchMode::Deferred => users.into_iter().map(UserAccount::unloaded).collect(),
        FetchMode::Eager => {
            let trails = users.load_many(trail::Entity, db).await?;
            users
                .into_iter()
                .zip(trails)
                .map(|(user, mut favorited_trails)| {
                    // Same order as `trails_of`
                    favorited_trails.sort_by_key(|trail| trail.trail_id);
                    UserAccount {
                        user,
                        favorited_trails: Some(favorited_trails),
                    }
                })
                .collect()
        }
    };

    Ok(accounts)
}

/// Overwrites the provided profile fields and returns the stored user.
#[instrument(skip(db, changes))]
pub async fn update_profile<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    changes: ProfileChanges,
) -> Result<user::Model> {
    let existing = require_user(db, user_id).await?;

    if changes.is_empty() {
        debug!("No fields to update for user ID: {}", user_id);
        return Ok(existing);
    }

    let fields = changes.field_names();
    let mut active: user::ActiveModel = existing.into();
    if let Some(username) = changes.username {
        active.username = Set(Some(username));
    }
    if let Some(password) = changes.password {
        active.password = Set(Some(password));
    }
    if let Some(city) = changes.city {
        active.city = Set(city);
    }
    if let Some(state) = changes.state {
        active.state = Set(state);
    }
    if let Some(experience) = changes.experience {
        active.experience = Set(experience);
    }

    let updated = active.update(db).await?;
    info!("Updated user {}: {}", user_id, fields.join(", "));
    Ok(updated)
}

/// Adds a trail to the user's favorites. The same trail may be added twice.
#[instrument(skip(db))]
pub async fn favorite_trail<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    favorite: NewFavorite,
) -> Result<trail::Model> {
    require_user(db, user_id).await?;

    let trail = trail::ActiveModel {
        user_id: Set(user_id),
        app_id: Set(favorite.app_id),
        name: Set(favorite.name),
        trail_length: Set(favorite.trail_length),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("User {} favorited trail {}", user_id, trail.trail_id);
    Ok(trail)
}

/// The user's favorites ordered by trail id.
#[instrument(skip(db))]
pub async fn favorites_of<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Vec<trail::Model>> {
    let user = require_user(db, user_id).await?;
    trails_of(db, &user).await
}

#[instrument(skip(db))]
pub async fn unfavorite_trail<C: ConnectionTrait>(db: &C, user_id: i32, trail_id: i32) -> Result<()> {
    require_user(db, user_id).await?;

    let result = trail::Entity::delete_many()
        .filter(trail::Column::TrailId.eq(trail_id))
        .filter(trail::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        warn!("Trail {} is not a favorite of user {}", trail_id, user_id);
        return Err(StoreError::TrailNotFound { user_id, trail_id });
    }

    info!("User {} unfavorited trail {}", user_id, trail_id);
    Ok(())
}

/// Deletes the user and every trail it favorited in one transaction.
/// Returns the number of trail rows removed.
#[instrument(skip(db))]
pub async fn delete_user<C>(db: &C, user_id: i32) -> Result<u64>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let trails = trail::Entity::delete_many()
        .filter(trail::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;
    trace!("Removed {} trails of user {}", trails.rows_affected, user_id);

    let users = user::Entity::delete_by_id(user_id).exec(&txn).await?;
    if users.rows_affected == 0 {
        // Dropping the transaction rolls back the trail deletion
        warn!("User with ID {} not found for deletion", user_id);
        return Err(StoreError::UserNotFound(user_id));
    }

    txn.commit().await?;
    info!(
        "Deleted user {} together with {} favorited trails",
        user_id, trails.rows_affected
    );
    Ok(trails.rows_affected)
}
