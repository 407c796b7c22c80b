pub mod error;
pub mod models;
pub mod repository;
pub mod scoring;
pub mod taxonomy;
pub mod user;
