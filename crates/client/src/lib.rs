//! REST client and client-side session for the attendance API.

pub mod api;
pub mod session;
pub mod token;

pub use api::ApiClient;
pub use session::{MemoryStorage, Session, SessionStorage};
pub use token::decode_claims;

#[cfg(feature = "browser")]
pub use session::BrowserStorage;
