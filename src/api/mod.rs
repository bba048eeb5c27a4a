pub mod auth;
pub mod health;
pub mod posts;
pub mod signups;
pub mod swagger;
pub mod users;
