use thiserror::Error;

/// Failures surfaced by the user data-access layer.
#[derive(Debug, Error)]
pub enum UserDaoError {
    /// A required argument was absent. Raised before the store is touched.
    #[error("{0} cannot be null")]
    InvalidArgument(&'static str),

    /// An exact-match lookup matched nothing.
    #[error("User {0} was not found.")]
    NotFound(String),

    /// A required column came back NULL while mapping a row.
    #[error("column `{column}` is null in users row")]
    Mapping { column: &'static str },

    /// Anything the database reported, passed through untouched.
    #[error(transparent)]
    Store(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hash(String),
}

pub type Result<T> = std::result::Result<T, UserDaoError>;

impl UserDaoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True when the store rejected a write because of a unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Store(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_subject() {
        assert_eq!(
            UserDaoError::NotFound("bob".into()).to_string(),
            "User bob was not found."
        );
        assert_eq!(
            UserDaoError::InvalidArgument("Username").to_string(),
            "Username cannot be null"
        );
        assert!(UserDaoError::Mapping { column: "role" }
            .to_string()
            .contains("role"));
    }

    #[test]
    fn store_errors_are_not_unique_violations_by_default() {
        let err = UserDaoError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_unique_violation());
        assert!(!err.is_not_found());
    }
}
