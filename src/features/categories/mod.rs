pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::CategoryService;
pub use stores::{CategoryStore, PgCategoryStore};
