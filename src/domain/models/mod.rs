pub mod auth;
pub mod household;
pub mod invitation;
pub mod member;
pub mod product;
pub mod stock;
pub mod user;
