pub mod access;
pub mod attendance;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod password;
pub mod student;

pub use access::*;
pub use attendance::*;
pub use catalog::*;
pub use config::*;
pub use error::*;
pub use models::*;
pub use password::*;
pub use student::*;
