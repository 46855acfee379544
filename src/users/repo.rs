use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument, warn};

use crate::error::{Result, UserDaoError};
use crate::users::dao::UserDao;
use crate::users::password::hash_password;
use crate::users::repo_types::{map_rows, User, UserRow};
use crate::users::role::normalize_role;

/// Postgres-backed [`UserDao`]. Every call checks out one pooled connection
/// and returns it when the call finishes, whatever the outcome.
#[derive(Clone)]
pub struct PgUserDao {
    db: PgPool,
}

impl PgUserDao {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDao for PgUserDao {
    #[instrument(skip(self))]
    async fn find_id_by_username(&self, username: Option<&str>) -> Result<i32> {
        let username = username.ok_or(UserDaoError::InvalidArgument("Username"))?;
        let mut conn = self.db.acquire().await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT user_id
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await?;

        id.ok_or_else(|| {
            warn!(%username, "no user id for username");
            UserDaoError::NotFound(username.to_string())
        })
    }

    #[instrument(skip(self))]
    async fn get_user_by_id(&self, user_id: i32) -> Result<Option<User>> {
        let mut conn = self.db.acquire().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, password_hash, role, image
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

        row.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<User>> {
        let mut conn = self.db.acquire().await?;

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, password_hash, role, image
            FROM users
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        debug!(count = rows.len(), "users fetched");
        map_rows(rows)
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: Option<&str>) -> Result<User> {
        let username = username.ok_or(UserDaoError::InvalidArgument("Username"))?;
        let mut conn = self.db.acquire().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, password_hash, role, image
            FROM users
            WHERE LOWER(username) = LOWER($1)
            ORDER BY user_id
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some(row) => User::try_from(row),
            None => {
                warn!(%username, "user not found");
                Err(UserDaoError::NotFound(username.to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    async fn find_by_username_contains(&self, fragment: Option<&str>) -> Result<Vec<User>> {
        let fragment = fragment.unwrap_or_default();
        let mut conn = self.db.acquire().await?;

        // POSITION instead of LIKE keeps % and _ literal
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, password_hash, role, image
            FROM users
            WHERE POSITION(LOWER($1) IN LOWER(username)) > 0
            "#,
        )
        .bind(fragment)
        .fetch_all(&mut *conn)
        .await?;

        debug!(count = rows.len(), "username substring matches");
        map_rows(rows)
    }

    #[instrument(skip(self, password))]
    async fn create(&self, username: &str, password: &str, role: &str) -> Result<bool> {
        let password_hash = hash_password(password)?;
        let role = normalize_role(role);
        let mut conn = self.db.acquire().await?;

        let done = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(username)
        .bind(&password_hash)
        .bind(&role)
        .execute(&mut *conn)
        .await?;

        let created = done.rows_affected() == 1;
        debug!(%username, %role, created, "user insert");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn users_by_board_game(&self, board_game_id: &str) -> Result<Vec<User>> {
        let mut conn = self.db.acquire().await?;

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT users.user_id, users.username, users.password_hash, users.role, users.image
            FROM users
            JOIN boardgames ON boardgames.user_id = users.user_id
            WHERE boardgames.board_game_id = $1
            "#,
        )
        .bind(board_game_id)
        .fetch_all(&mut *conn)
        .await?;

        map_rows(rows)
    }

    #[instrument(skip(self))]
    async fn find_username_in_posts(&self, user_id: i32) -> Result<Option<String>> {
        let mut conn = self.db.acquire().await?;

        let username = sqlx::query_scalar::<_, String>(
            r#"
            SELECT username
            FROM users
            WHERE user_id IN (SELECT user_id FROM posts WHERE user_id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(username)
    }
}
