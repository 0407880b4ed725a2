pub mod confidence;
pub mod sanitize;

pub use confidence::classify;
pub use sanitize::{sanitize_json_response, sanitize_text};
