pub mod pool;
pub mod post_repo;
pub mod user_repo;

pub use pool::create_pool;
