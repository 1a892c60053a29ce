pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod router;
pub mod solana;

#[cfg(test)]
mod test_support;

// Re-export commonly used items
pub use config::Config;
pub use di::ServiceContainer;
pub use entity::{AppError, Result};
pub use router::{create_router, serve};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
