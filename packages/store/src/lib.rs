pub mod config;
pub mod token;

pub use config::ClientConfig;
pub use token::{MemoryTokens, SharedTokens, TokenStore};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use token::LocalStorageTokens;
