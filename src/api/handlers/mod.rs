pub mod auth;
pub mod health;
pub mod household;
pub mod invitation;
pub mod member;
pub mod product;
pub mod stock;
