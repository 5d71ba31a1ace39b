// Standalone components
pub mod alert;
pub mod badge;
pub mod button;
pub mod card;
pub mod form_select;
pub mod input;
pub mod page_header;
pub mod search_bar;

// Composite: depend on button and search_bar
pub mod pagination;
pub mod data_table;

// Re-exports for convenience
pub use alert::*;
pub use badge::*;
pub use button::*;
pub use card::*;
pub use data_table::*;
pub use form_select::*;
pub use input::*;
pub use page_header::*;
pub use pagination::*;
pub use search_bar::*;
