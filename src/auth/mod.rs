pub mod credentials;
pub mod token;
pub mod token_store;

pub use credentials::{ACCESS_TOKEN_ENV, CredentialProvider};
pub use token::TokenSet;
pub use token_store::{FileTokenStore, TokenStore};
