pub mod auth_service;
pub mod invitation_service;
pub mod policy;
pub mod shopping;
