mod helpers;

use ferrous_relay_application::use_cases::ForwardDnsQueryUseCase;
use ferrous_relay_infrastructure::dns::{DnsServerHandler, RoundRobinPool, UdpForwarder};
use helpers::dns_server_mock::{MockBehavior, MockDnsServer};
use helpers::{encode, endpoint, query_bytes};
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::RecordType;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

fn handler(ports: &[u16], timeout: Duration) -> DnsServerHandler {
    let pool = RoundRobinPool::new(ports.iter().map(|p| endpoint(*p)).collect()).unwrap();
    let use_case = ForwardDnsQueryUseCase::new(Arc::new(pool), Arc::new(UdpForwarder::new(timeout)));
    DnsServerHandler::new(Arc::new(use_case))
}

#[tokio::test]
async fn test_forwards_answer_with_request_id() {
    let upstream = MockDnsServer::start(MockBehavior::Answer(Ipv4Addr::new(192, 0, 2, 1)))
        .await
        .unwrap();
    let handler = handler(&[upstream.port()], Duration::from_millis(500));

    let reply = handler
        .handle_raw_udp(&query_bytes(0xBEEF, "example.com.", RecordType::A))
        .await
        .expect("a reply should be produced");
    let reply = Message::from_vec(&reply).unwrap();

    assert_eq!(reply.id(), 0xBEEF);
    assert_eq!(reply.message_type(), MessageType::Response);
    assert_eq!(reply.response_code(), ResponseCode::NoError);
    assert!(reply.recursion_available());
    assert_eq!(reply.queries()[0].name().to_utf8(), "example.com.");
    assert_eq!(reply.answers().len(), 1);
}

#[tokio::test]
async fn test_alternates_between_upstreams() {
    let first = MockDnsServer::start(MockBehavior::Answer(Ipv4Addr::new(192, 0, 2, 1)))
        .await
        .unwrap();
    let second = MockDnsServer::start(MockBehavior::Answer(Ipv4Addr::new(192, 0, 2, 2)))
        .await
        .unwrap();
    let handler = handler(&[first.port(), second.port()], Duration::from_millis(500));

    for id in 0..4u16 {
        let reply = handler
            .handle_raw_udp(&query_bytes(id, "example.com.", RecordType::A))
            .await;
        assert!(reply.is_some());
    }

    assert_eq!(first.query_count(), 2);
    assert_eq!(second.query_count(), 2);
}

#[tokio::test]
async fn test_silent_upstream_yields_servfail_with_diagnostic() {
    let upstream = MockDnsServer::start(MockBehavior::Silent).await.unwrap();
    let handler = handler(&[upstream.port()], Duration::from_millis(100));

    let reply = handler
        .handle_raw_udp(&query_bytes(42, "slow.example.", RecordType::A))
        .await
        .unwrap();
    let reply = Message::from_vec(&reply).unwrap();

    assert_eq!(reply.id(), 42);
    assert_eq!(reply.response_code(), ResponseCode::ServFail);
    assert!(reply.answers().is_empty());
    assert_eq!(reply.additionals().len(), 1);
    assert_eq!(reply.additionals()[0].record_type(), RecordType::TXT);
    assert_eq!(reply.additionals()[0].name().to_utf8(), "slow.example.");
}

#[tokio::test]
async fn test_empty_message_yields_formerr() {
    let upstream = MockDnsServer::start(MockBehavior::Silent).await.unwrap();
    let handler = handler(&[upstream.port()], Duration::from_millis(100));

    let request = Message::new(7, MessageType::Query, OpCode::Query);
    let reply = handler.handle_raw_udp(&encode(&request)).await.unwrap();
    let reply = Message::from_vec(&reply).unwrap();

    assert_eq!(reply.id(), 7);
    assert_eq!(reply.response_code(), ResponseCode::FormErr);
    assert_eq!(reply.additionals().len(), 1);
    assert_eq!(reply.additionals()[0].name().to_utf8(), ".");
    assert_eq!(upstream.query_count(), 0);
}

#[tokio::test]
async fn test_garbage_datagram_is_dropped() {
    let handler = handler(&[9], Duration::from_millis(100));
    assert!(handler.handle_raw_udp(&[0x01, 0x02, 0x03]).await.is_none());
}

#[tokio::test]
async fn test_response_datagram_is_dropped() {
    let handler = handler(&[9], Duration::from_millis(100));
    let message = Message::new(1, MessageType::Response, OpCode::Query);
    assert!(handler.handle_raw_udp(&encode(&message)).await.is_none());
}
