//! Customer directory tools.
//!
//! The directory answers with `{"users": [...]}` and authenticates with a
//! bearer token:
//! - `find_by_first_name`: single customer lookup
//! - `list_users`: every user as JSON
//! - `list_users_table`: every user as a delimited table

pub mod find_by_first_name;
pub mod list_users;
pub mod list_users_table;

pub use find_by_first_name::{FindCustomerByFirstNameParams, FindCustomerByFirstNameTool};
pub use list_users::ListUsersTool;
pub use list_users_table::ListUsersTableTool;

/// Key holding the record array in directory responses.
pub(crate) const USERS_KEY: &str = "users";
