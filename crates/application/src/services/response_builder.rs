//! Reply construction for forwarded queries.
//!
//! Every reply mirrors the inbound envelope (id, op code, RD/CD flags and the
//! first question), is marked as a response and advertises recursion.

use crate::ports::UpstreamAnswer;
use ferrous_relay_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::TXT;
use hickory_proto::rr::{Name, RData, Record};
use tracing::{debug, warn};

/// TTL of the diagnostic TXT record attached to error replies.
pub const DIAGNOSTIC_TTL: u32 = 3600;

/// Longest text a single TXT character-string can carry on the wire.
pub const MAX_DIAGNOSTIC_TEXT_LEN: usize = 255;

pub struct ResponseBuilder;

impl ResponseBuilder {
    /// Reply carrying the upstream's sections, response code and TC bit unchanged.
    pub fn forward(request: &Message, answer: UpstreamAnswer) -> Message {
        let mut response = Self::reply_to(request);
        response.set_response_code(answer.response_code);
        response.set_truncated(answer.truncated);
        response.add_answers(answer.answers);
        response.add_name_servers(answer.authorities);
        response.add_additionals(answer.additionals);
        response
    }

    /// Error reply with `code` and a TXT record explaining the failure.
    ///
    /// `qname` is the offending question's name; the root name is used when
    /// the request had no question. If the TXT record cannot be built the
    /// reply is still returned with the status code set.
    pub fn error(
        request: &Message,
        qname: Option<&Name>,
        code: ResponseCode,
        message: &str,
    ) -> Message {
        let mut response = Self::reply_to(request);
        response.set_response_code(code);

        match Self::diagnostic_record(qname, message) {
            Ok(record) => {
                response.add_additional(record);
            }
            Err(e) => {
                warn!(error = %e, code = ?code, "Unable to create resource record for error message");
            }
        }

        debug!(id = request.id(), code = ?code, "Error response built");
        response
    }

    /// `<qname> 3600 IN TXT "<message>"`, owner name made fully qualified.
    pub fn diagnostic_record(qname: Option<&Name>, message: &str) -> Result<Record, DomainError> {
        if message.len() > MAX_DIAGNOSTIC_TEXT_LEN {
            return Err(DomainError::DiagnosticRecord(format!(
                "text is {} bytes, limit is {}",
                message.len(),
                MAX_DIAGNOSTIC_TEXT_LEN
            )));
        }

        let mut owner = qname.cloned().unwrap_or_else(Name::root);
        owner.set_fqdn(true);

        Ok(Record::from_rdata(
            owner,
            DIAGNOSTIC_TTL,
            RData::TXT(TXT::new(vec![message.to_string()])),
        ))
    }

    fn reply_to(request: &Message) -> Message {
        let mut response = Message::new(request.id(), MessageType::Response, request.op_code());

        if request.op_code() == OpCode::Query {
            response.set_recursion_desired(request.recursion_desired());
            response.set_checking_disabled(request.checking_disabled());
        }
        response.set_recursion_available(true);

        if let Some(question) = request.queries().first() {
            response.add_query(question.clone());
        }

        response
    }
}
