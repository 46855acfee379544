use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{Result, UserDaoError};
use crate::users::dao::UserDao;
use crate::users::password::hash_password;
use crate::users::repo_types::{map_rows, User, UserRow};
use crate::users::role::normalize_role;

#[derive(Default)]
struct Tables {
    next_id: i32,
    users: Vec<UserRow>,
    boardgames: Vec<(String, i32)>,
    posts: Vec<i32>,
}

impl Tables {
    fn find(&self, user_id: i32) -> Option<&UserRow> {
        self.users.iter().find(|u| u.user_id == user_id)
    }
}

/// In-process [`UserDao`] holding `users`, `boardgames` and `posts` in insertion
/// order. Usernames are not unique here, unlike the Postgres schema.
#[derive(Default)]
pub struct MemoryUserDao {
    tables: Mutex<Tables>,
}

impl MemoryUserDao {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a row verbatim, bypassing hashing and role normalization.
    pub fn insert_raw_row(&self, mut row: UserRow) -> i32 {
        let mut t = self.tables();
        t.next_id = t.next_id.max(row.user_id) + 1;
        if row.user_id == 0 {
            row.user_id = t.next_id;
        }
        let id = row.user_id;
        t.users.push(row);
        id
    }

    pub fn add_board_game(&self, board_game_id: &str, user_id: i32) {
        self.tables()
            .boardgames
            .push((board_game_id.to_string(), user_id));
    }

    pub fn add_post(&self, user_id: i32) {
        self.tables().posts.push(user_id);
    }
}

#[async_trait]
impl UserDao for MemoryUserDao {
    async fn find_id_by_username(&self, username: Option<&str>) -> Result<i32> {
        let username = username.ok_or(UserDaoError::InvalidArgument("Username"))?;
        let t = self.tables();
        t.users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.user_id)
            .ok_or_else(|| {
                warn!(%username, "no user id for username");
                UserDaoError::NotFound(username.to_string())
            })
    }

    async fn get_user_by_id(&self, user_id: i32) -> Result<Option<User>> {
        let t = self.tables();
        t.find(user_id).cloned().map(User::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let rows = self.tables().users.clone();
        map_rows(rows)
    }

    async fn find_by_username(&self, username: Option<&str>) -> Result<User> {
        let username = username.ok_or(UserDaoError::InvalidArgument("Username"))?;
        let needle = username.to_lowercase();
        let row = self
            .tables()
            .users
            .iter()
            .find(|u| u.username.to_lowercase() == needle)
            .cloned();
        match row {
            Some(row) => User::try_from(row),
            None => {
                warn!(%username, "user not found");
                Err(UserDaoError::NotFound(username.to_string()))
            }
        }
    }

    async fn find_by_username_contains(&self, fragment: Option<&str>) -> Result<Vec<User>> {
        let needle = fragment.unwrap_or_default().to_lowercase();
        let rows: Vec<UserRow> = self
            .tables()
            .users
            .iter()
            .filter(|u| u.username.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        map_rows(rows)
    }

    async fn create(&self, username: &str, password: &str, role: &str) -> Result<bool> {
        let password_hash = hash_password(password)?;
        let role = normalize_role(role);
        let id = self.insert_raw_row(UserRow {
            user_id: 0,
            username: username.to_string(),
            password_hash,
            role: Some(role),
            image: None,
        });
        debug!(%username, user_id = id, "user insert");
        Ok(true)
    }

    async fn users_by_board_game(&self, board_game_id: &str) -> Result<Vec<User>> {
        let t = self.tables();
        let rows: Vec<UserRow> = t
            .boardgames
            .iter()
            .filter(|(game, _)| game == board_game_id)
            .filter_map(|(_, owner)| t.find(*owner).cloned())
            .collect();
        map_rows(rows)
    }

    async fn find_username_in_posts(&self, user_id: i32) -> Result<Option<String>> {
        let t = self.tables();
        if !t.posts.contains(&user_id) {
            return Ok(None);
        }
        Ok(t.find(user_id).map(|u| u.username.clone()))
    }
}
