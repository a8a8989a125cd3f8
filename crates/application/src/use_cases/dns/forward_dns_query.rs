use crate::ports::{UpstreamExchanger, UpstreamSelector};
use crate::services::ResponseBuilder;
use ferrous_relay_domain::{DnsQuery, RecordType};
use hickory_proto::op::{Message, ResponseCode};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const EMPTY_MESSAGE_TEXT: &str = "empty DNS message received";
pub const FORWARD_FAILURE_TEXT: &str = "unable to forward due to timeout";

/// Forwards one inbound query to the next upstream and builds the reply.
///
/// Runs once per received query; invocations may run concurrently. Only the
/// first question is forwarded and a failed exchange is never retried.
pub struct ForwardDnsQueryUseCase {
    selector: Arc<dyn UpstreamSelector>,
    exchanger: Arc<dyn UpstreamExchanger>,
}

impl ForwardDnsQueryUseCase {
    pub fn new(selector: Arc<dyn UpstreamSelector>, exchanger: Arc<dyn UpstreamExchanger>) -> Self {
        Self {
            selector,
            exchanger,
        }
    }

    pub async fn execute(&self, request: &Message) -> Message {
        let start = Instant::now();

        let Some(question) = request.queries().first() else {
            warn!(id = request.id(), "Empty DNS message received");
            return ResponseBuilder::error(request, None, ResponseCode::FormErr, EMPTY_MESSAGE_TEXT);
        };

        if request.queries().len() > 1 {
            debug!(
                id = request.id(),
                questions = request.queries().len(),
                "Only the first question is forwarded"
            );
        }

        let qname = question.name();
        let query = DnsQuery::new(
            qname.to_utf8(),
            RecordType::from_u16(u16::from(question.query_type())),
        );

        let endpoint = self.selector.next();
        info!(
            domain = %query.domain,
            record_type = %query.record_type,
            server = %endpoint,
            "Chosen resolver"
        );

        match self.exchanger.exchange(&query, &endpoint).await {
            Ok(answer) => {
                debug!(
                    domain = %query.domain,
                    server = %endpoint,
                    rcode = ?answer.response_code,
                    records = answer.record_count(),
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "Forwarding upstream answer"
                );
                ResponseBuilder::forward(request, answer)
            }
            Err(e) => {
                warn!(
                    domain = %query.domain,
                    server = %endpoint,
                    error = %e,
                    "Unable to forward query"
                );
                ResponseBuilder::error(
                    request,
                    Some(qname),
                    ResponseCode::ServFail,
                    FORWARD_FAILURE_TEXT,
                )
            }
        }
    }
}
