pub mod resolver;
pub mod udp;
