pub mod permissions;
pub mod submissions;
pub mod tokens;
pub mod users;
