pub mod forwarding;
pub mod load_balancer;
pub mod server;
pub mod transport;

pub use forwarding::{MessageBuilder, ResponseParser, UdpForwarder};
pub use load_balancer::RoundRobinPool;
pub use server::DnsServerHandler;
