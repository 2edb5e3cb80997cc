pub mod account;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod merchant;
pub mod orders;
