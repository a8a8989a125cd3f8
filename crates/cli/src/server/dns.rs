use ferrous_relay_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn};

const MAX_DATAGRAM_SIZE: usize = 4096;

pub async fn start_dns_server(socket_addr: SocketAddr, handler: Arc<DnsServerHandler>) -> anyhow::Result<()> {
    let socket = Arc::new(create_udp_socket(socket_addr).map_err(|e| {
        error!(bind_address = %socket_addr, error = %e, "Failed to bind DNS socket");
        anyhow::anyhow!("Failed to bind {}: {}", socket_addr, e)
    })?);

    info!(bind_address = %socket_addr, "DNS server ready (UDP)");

    tokio::select! {
        _ = run_udp_loop(socket, handler) => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn run_udp_loop(socket: Arc<UdpSocket>, handler: Arc<DnsServerHandler>) {
    let mut recv_buf = [0u8; MAX_DATAGRAM_SIZE];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                // ICMP port-unreachable from a previous reply surfaces here on some platforms.
                warn!(error = %e, "UDP recv error");
                continue;
            }
        };

        let owned_buf: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        let handler = handler.clone();
        let socket = socket.clone();

        tokio::spawn(async move {
            debug!(client = %from, bytes = owned_buf.len(), "DNS query received");

            if let Some(response) = handler.handle_raw_udp(&owned_buf).await {
                if let Err(e) = socket.send_to(&response, from).await {
                    warn!(client = %from, error = %e, "Failed to send DNS response");
                }
            }
        });
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> io::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}
