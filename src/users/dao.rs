use async_trait::async_trait;

use crate::error::Result;
use crate::users::repo_types::User;

/// Lookups and inserts over the `users` table.
///
/// Absent usernames are `None`. The two exact-match lookups by name fail with
/// `NotFound` when nothing matches, while `get_user_by_id` and
/// `find_username_in_posts` return `Ok(None)` instead. Callers rely on that
/// difference.
#[async_trait]
pub trait UserDao: Send + Sync {
    /// Id of the user whose username is exactly `username`.
    async fn find_id_by_username(&self, username: Option<&str>) -> Result<i32>;

    async fn get_user_by_id(&self, user_id: i32) -> Result<Option<User>>;

    /// Every user, in whatever order the store yields them.
    async fn find_all(&self) -> Result<Vec<User>>;

    /// Case-insensitive exact match on username.
    async fn find_by_username(&self, username: Option<&str>) -> Result<User>;

    /// Case-insensitive substring match. `None` and `""` match every user.
    async fn find_by_username_contains(&self, fragment: Option<&str>) -> Result<Vec<User>>;

    /// Insert a user with a hashed password and normalized role.
    /// `Ok(true)` only when exactly one row was written.
    async fn create(&self, username: &str, password: &str, role: &str) -> Result<bool>;

    /// Owners of the given board game.
    async fn users_by_board_game(&self, board_game_id: &str) -> Result<Vec<User>>;

    /// Username of `user_id` if that user has at least one post.
    async fn find_username_in_posts(&self, user_id: i32) -> Result<Option<String>>;
}
