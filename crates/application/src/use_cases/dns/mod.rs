pub mod forward_dns_query;

pub use forward_dns_query::{ForwardDnsQueryUseCase, EMPTY_MESSAGE_TEXT, FORWARD_FAILURE_TEXT};
