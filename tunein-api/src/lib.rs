// TuneIn API Library
//
// HTTP surface of the radio backend

pub mod http;

// Re-export commonly used types
pub use http::{create_router, AppState};
