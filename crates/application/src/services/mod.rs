pub mod response_builder;

pub use response_builder::{ResponseBuilder, DIAGNOSTIC_TTL, MAX_DIAGNOSTIC_TEXT_LEN};
