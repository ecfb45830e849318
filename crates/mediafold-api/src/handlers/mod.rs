pub mod delete;
pub mod health;
pub mod items;
pub mod upload;
