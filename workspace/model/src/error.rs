use thiserror::Error;

/// Errors raised by the account data-access layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No `app_user` row has this id
    #[error("User {0} not found")]
    UserNotFound(i32),

    /// The trail does not exist or belongs to someone else
    #[error("Trail {trail_id} not found among favorites of user {user_id}")]
    TrailNotFound { user_id: i32, trail_id: i32 },

    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Result type for data-access operations
pub type Result<T> = std::result::Result<T, StoreError>;
