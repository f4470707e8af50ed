pub mod auth;
pub mod household;
