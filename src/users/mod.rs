mod dao;
mod memory;
pub mod password;
mod repo;
pub mod repo_types;
pub mod role;

pub use dao::UserDao;
pub use memory::MemoryUserDao;
pub use repo::PgUserDao;
pub use repo_types::{User, UserRow};
