pub mod catalog;
pub mod config;
pub mod store;
pub mod token;

pub use catalog::CatalogError;
pub use config::ConfigError;
pub use store::StoreError;
pub use token::TokenError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Catalog(#[from] catalog::CatalogError),

    #[error(transparent)]
    Token(#[from] token::TokenError),

    #[error(transparent)]
    Store(#[from] store::StoreError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
