pub mod config;
pub mod error;
pub mod state;
pub mod telemetry;
pub mod users;

pub use error::{Result, UserDaoError};

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
