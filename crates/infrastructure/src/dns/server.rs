use crate::dns::forwarding::MessageBuilder;
use ferrous_relay_application::use_cases::ForwardDnsQueryUseCase;
use hickory_proto::op::{Message, MessageType};
use std::sync::Arc;
use tracing::{debug, error};

/// Turns one received datagram into the datagram to send back.
pub struct DnsServerHandler {
    use_case: Arc<ForwardDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ForwardDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns `None` when nothing should be sent: the datagram did not
    /// decode, it was itself a response, or the reply failed to serialize.
    pub async fn handle_raw_udp(&self, datagram: &[u8]) -> Option<Vec<u8>> {
        let request = match Message::from_vec(datagram) {
            Ok(message) => message,
            Err(e) => {
                debug!(bytes = datagram.len(), error = %e, "Dropping undecodable datagram");
                return None;
            }
        };

        if request.message_type() == MessageType::Response {
            debug!(id = request.id(), "Dropping unsolicited DNS response");
            return None;
        }

        let reply = self.use_case.execute(&request).await;

        match MessageBuilder::serialize_message(&reply) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(id = reply.id(), error = %e, "Failed to serialize reply");
                None
            }
        }
    }
}
