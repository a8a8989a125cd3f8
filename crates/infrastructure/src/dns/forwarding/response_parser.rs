use ferrous_relay_application::ports::UpstreamAnswer;
use ferrous_relay_domain::DomainError;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    /// Decodes an upstream reply and checks it answers the query sent with `expected_id`.
    pub fn parse(response_bytes: &[u8], expected_id: u16) -> Result<UpstreamAnswer, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(
                "Upstream sent a query instead of a response".to_string(),
            ));
        }

        if message.id() != expected_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response ID {:#06x} does not match query ID {:#06x}",
                message.id(),
                expected_id
            )));
        }

        let rcode = message.response_code();
        let truncated = message.truncated();

        debug!(
            rcode = ?rcode,
            answers = message.answers().len(),
            authority = message.name_servers().len(),
            additional = message.additionals().len(),
            truncated,
            "DNS response parsed"
        );

        Ok(UpstreamAnswer::new(rcode)
            .with_answers(message.answers().to_vec())
            .with_authorities(message.name_servers().to_vec())
            .with_additionals(message.additionals().to_vec())
            .with_truncated(truncated))
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
