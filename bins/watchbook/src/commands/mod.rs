//! CLI command implementations

pub mod account;
pub mod browse;
pub mod home;
pub mod providers;
pub mod releases;
pub mod search;
pub mod system;
pub mod tokens;
pub mod users;
pub mod view;
