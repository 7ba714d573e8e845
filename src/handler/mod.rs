pub mod auth;
pub mod jobs;
pub mod notifications;
pub mod proposals;
pub mod users;
