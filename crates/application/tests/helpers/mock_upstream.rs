use async_trait::async_trait;
use ferrous_relay_application::ports::{UpstreamAnswer, UpstreamExchanger, UpstreamSelector};
use ferrous_relay_domain::{DnsQuery, DomainError, RecordType, ResolverEndpoint};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn query_message(id: u16, name: &str, record_type: hickory_proto::rr::RecordType) -> Message {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    message
}

pub fn a_record(name: &str, ip: Ipv4Addr) -> Record {
    Record::from_rdata(Name::from_str(name).unwrap(), 300, RData::A(A(ip)))
}

/// Always returns the same endpoint, counting how often it was asked.
pub struct FixedSelector {
    endpoint: ResolverEndpoint,
    calls: AtomicUsize,
}

impl FixedSelector {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.parse().unwrap(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl UpstreamSelector for FixedSelector {
    fn next(&self) -> ResolverEndpoint {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.endpoint
    }
}

/// Cycles through a fixed list; a minimal stand-in for the real pool.
pub struct SequenceSelector {
    endpoints: Vec<ResolverEndpoint>,
    cursor: Mutex<usize>,
}

impl SequenceSelector {
    pub fn new(endpoints: &[&str]) -> Self {
        Self {
            endpoints: endpoints.iter().map(|e| e.parse().unwrap()).collect(),
            cursor: Mutex::new(0),
        }
    }
}

impl UpstreamSelector for SequenceSelector {
    fn next(&self) -> ResolverEndpoint {
        let mut cursor = self.cursor.lock().unwrap();
        let endpoint = self.endpoints[*cursor];
        *cursor = (*cursor + 1) % self.endpoints.len();
        endpoint
    }
}

#[derive(Clone)]
pub struct MockUpstreamExchanger {
    answer: Arc<Mutex<Option<UpstreamAnswer>>>,
    calls: Arc<Mutex<Vec<(DnsQuery, ResolverEndpoint)>>>,
}

impl MockUpstreamExchanger {
    /// Exchanger that fails every call.
    pub fn failing() -> Self {
        Self {
            answer: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn answering(answer: UpstreamAnswer) -> Self {
        Self {
            answer: Arc::new(Mutex::new(Some(answer))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<(DnsQuery, ResolverEndpoint)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_query(&self) -> Option<DnsQuery> {
        self.calls.lock().unwrap().last().map(|(q, _)| q.clone())
    }

    pub fn last_record_type(&self) -> Option<RecordType> {
        self.last_query().map(|q| q.record_type)
    }
}

#[async_trait]
impl UpstreamExchanger for MockUpstreamExchanger {
    async fn exchange(
        &self,
        query: &DnsQuery,
        endpoint: &ResolverEndpoint,
    ) -> Result<UpstreamAnswer, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.clone(), *endpoint));

        match self.answer.lock().unwrap().clone() {
            Some(answer) => Ok(answer),
            None => Err(DomainError::UpstreamExchangeFailed {
                server: endpoint.to_string(),
                reason: "Query timeout".into(),
            }),
        }
    }
}
