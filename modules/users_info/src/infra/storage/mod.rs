pub mod entity;
pub mod schema;
pub mod sql_repo;

pub use schema::ensure_users_table;
pub use sql_repo::SqlUsersRepository;
