pub mod catalog;
pub mod purge;
pub mod upload;
