pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod mediatype;
pub mod models;

pub use config::Config;
