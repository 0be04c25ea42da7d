// Authentication: in-memory users, bcrypt hashes, HS256 bearer tokens.

mod error;
pub mod extractor;
pub mod handlers;
pub mod password;
pub mod store;
pub mod token;

pub use error::AuthError;
pub use extractor::AuthUser;
pub use store::UserStore;
pub use token::TokenIssuer;
