use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::UserDaoError;

/// Raw `users` row as the database returns it.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: i32,
    pub username: String,
    pub password_hash: String,
    pub role: Option<String>,
    pub image: Option<String>,
}

/// User record handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,   // e.g. ROLE_ADMIN
    pub activated: bool, // always true, there is no activation column
    pub image: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = UserDaoError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let role = r.role.ok_or(UserDaoError::Mapping { column: "role" })?;
        Ok(Self {
            id: r.user_id,
            username: r.username,
            password_hash: r.password_hash,
            role,
            activated: true,
            image: r.image,
        })
    }
}

/// Map a batch of rows, failing on the first unmappable one.
pub(crate) fn map_rows(rows: Vec<UserRow>) -> Result<Vec<User>, UserDaoError> {
    rows.into_iter().map(User::try_from).collect()
}
