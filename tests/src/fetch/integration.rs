#![cfg(test)]
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time;

use fetchr_common::config::FetchConfig;
use fetchr_common::network::addr::ResolvedAddr;
use fetchr_common::platform::{ResolveError, Resolver};
use fetchr_common::tls::{
    CredentialError, CredentialKind, CredentialStore, SecTag, TlsConfig,
};
use fetchr_core::fetch::{FetchError, FetchReport, FetchService};
use fetchr_core::network::connect::ConnectError;
use fetchr_core::platform::sim::{SimBus, SimModem};
use fetchr_core::tls::MemoryCredentialStore;

/// Resolves every name to one fixed loopback candidate.
struct FixedResolver {
    target: ResolvedAddr,
}

#[async_trait]
impl Resolver for FixedResolver {
    async fn resolve(&self, _host: &str, _port: u16) -> Result<Vec<ResolvedAddr>, ResolveError> {
        Ok(vec![self.target])
    }
}

/// Counts lookups and fails each one, for ordering assertions.
struct CountingResolver {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Resolver for CountingResolver {
    async fn resolve(&self, host: &str, _port: u16) -> Result<Vec<ResolvedAddr>, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ResolveError::NoCandidates { host: host.to_string() })
    }
}

/// Fails every lookup the way an unreachable resolver would.
struct FailingResolver;

#[async_trait]
impl Resolver for FailingResolver {
    async fn resolve(&self, _host: &str, _port: u16) -> Result<Vec<ResolvedAddr>, ResolveError> {
        Err(ResolveError::Lookup { source: io::Error::other("scripted lookup failure") })
    }
}

/// Credential store that counts install attempts.
struct CountingStore {
    inner: MemoryCredentialStore,
    installs: Arc<AtomicUsize>,
}

impl CountingStore {
    fn new(installs: Arc<AtomicUsize>) -> Self {
        Self { inner: MemoryCredentialStore::new(), installs }
    }
}

impl CredentialStore for CountingStore {
    fn install(
        &self,
        tag: SecTag,
        kind: CredentialKind,
        bytes: &[u8],
    ) -> Result<(), CredentialError> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        self.inner.install(tag, kind, bytes)
    }

    fn lookup(&self, tag: SecTag, kind: CredentialKind) -> Option<Vec<u8>> {
        self.inner.lookup(tag, kind)
    }
}

/// Sink that refuses every write, for exercising the close path after a
/// mid-exchange failure.
struct RefusingSink;

impl AsyncWrite for RefusingSink {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::other("sink refused the chunk")))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

fn resolved(addr: SocketAddr) -> ResolvedAddr {
    match addr {
        SocketAddr::V4(v4) => ResolvedAddr::from(v4),
        SocketAddr::V6(_) => unreachable!("listener is bound to an IPv4 address"),
    }
}

fn config_for(target: ResolvedAddr, host: &str, path: &str) -> FetchConfig {
    FetchConfig {
        host: host.to_string(),
        port: target.port(),
        path: path.to_string(),
        tls: None,
        poll_interval: Duration::from_millis(10),
        wait_deadline: Some(Duration::from_secs(5)),
    }
}

/// Binds a loopback listener and serves exactly one exchange: read the
/// request up to its terminating blank line, write `response`, close the
/// write side, then wait for the client to close. The captured request
/// bytes come back through the join handle.
async fn serve_once(response: &'static [u8]) -> (ResolvedAddr, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let target = resolved(listener.local_addr().unwrap());

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        socket.write_all(response).await.unwrap();
        socket.shutdown().await.unwrap();

        // Gone is gone, whether the client said FIN or tore the
        // connection down.
        let mut rest = [0u8; 64];
        loop {
            match socket.read(&mut rest).await {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
        }

        request
    });

    (target, server)
}

async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
    let mut request: Vec<u8> = Vec::new();
    let mut byte = [0u8; 1];
    while !request.ends_with(b"\r\n\r\n") {
        let len = socket.read(&mut byte).await.unwrap();
        assert_ne!(len, 0, "client closed before finishing the request");
        request.extend_from_slice(&byte);
    }
    request
}

async fn assert_no_connection(listener: &TcpListener) {
    let pending = time::timeout(Duration::from_millis(100), listener.accept()).await;
    assert!(pending.is_err(), "no connection should have been attempted");
}

const RESPONSE: &[u8] =
    b"HTTP/1.0 200 OK\r\nContent-Type: text/plain\r\n\r\nhello from the other side";

#[tokio::test]
async fn fetch_end_to_end_over_loopback() {
    let (target, server) = serve_once(RESPONSE).await;
    let installs = Arc::new(AtomicUsize::new(0));

    let service = FetchService::new(
        Box::new(SimBus::with_ready_after(Duration::from_millis(50))),
        Box::new(SimModem::default()),
        Box::new(FixedResolver { target }),
        Box::new(CountingStore::new(Arc::clone(&installs))),
    );

    let mut sink: Vec<u8> = Vec::new();
    let config = config_for(target, "example.test", "/index.html");
    let report: FetchReport = service.run(&config, &mut sink).await.unwrap();

    assert_eq!(sink, RESPONSE, "sink must carry the raw response bytes");
    assert_eq!(report.bytes_received, RESPONSE.len() as u64);
    assert_eq!(report.peer, target);

    let request: Vec<u8> = server.await.unwrap();
    assert_eq!(request, b"GET /index.html HTTP/1.0\r\nHost: www.example.test\r\n\r\n");

    assert_eq!(
        installs.load(Ordering::SeqCst),
        0,
        "a plain fetch never touches the credential store"
    );
}

#[tokio::test]
async fn silent_network_times_the_fetch_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let target = resolved(listener.local_addr().unwrap());

    let service = FetchService::new(
        Box::new(SimBus::new()),
        Box::new(SimModem::default()),
        Box::new(FixedResolver { target }),
        Box::new(MemoryCredentialStore::new()),
    );

    let mut sink: Vec<u8> = Vec::new();
    let config = FetchConfig {
        poll_interval: Duration::from_millis(5),
        wait_deadline: Some(Duration::from_millis(30)),
        ..config_for(target, "example.test", "/")
    };

    let err = service.run(&config, &mut sink).await.unwrap_err();

    assert!(
        matches!(err, FetchError::ReadyTimeout { .. }),
        "expected a readiness timeout, got {err:?}"
    );
    assert!(sink.is_empty());
    assert_no_connection(&listener).await;
}

#[tokio::test]
async fn modem_failure_aborts_before_resolution() {
    let calls = Arc::new(AtomicUsize::new(0));

    let service = FetchService::new(
        Box::new(SimBus::with_ready_after(Duration::ZERO)),
        Box::new(SimModem { status: 92 }),
        Box::new(CountingResolver { calls: Arc::clone(&calls) }),
        Box::new(MemoryCredentialStore::new()),
    );

    let mut sink: Vec<u8> = Vec::new();
    let err = service.run(&FetchConfig::default(), &mut sink).await.unwrap_err();

    assert!(matches!(err, FetchError::Modem(_)), "expected a modem error, got {err:?}");
    assert_eq!(err.to_string(), "modem init err: 92");
    assert_eq!(
        calls.load(Ordering::SeqCst),
        0,
        "resolution must not run after a modem failure"
    );
}

#[tokio::test]
async fn resolution_failure_aborts_before_connect() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let target = resolved(listener.local_addr().unwrap());

    let service = FetchService::new(
        Box::new(SimBus::with_ready_after(Duration::ZERO)),
        Box::new(SimModem::default()),
        Box::new(FailingResolver),
        Box::new(MemoryCredentialStore::new()),
    );

    let mut sink: Vec<u8> = Vec::new();
    let config = config_for(target, "nonexistent.test", "/");
    let err = service.run(&config, &mut sink).await.unwrap_err();

    assert!(matches!(err, FetchError::Resolve(_)), "expected a resolve error, got {err:?}");
    assert_eq!(err.to_string(), "unable to resolve address, quitting");
    assert_no_connection(&listener).await;
}

#[tokio::test]
async fn mid_stream_reset_keeps_partial_output() {
    const PARTIAL: &[u8] = b"HTTP/1.0 200 OK\r\n\r\nfirst half";

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let target = resolved(listener.local_addr().unwrap());

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;

        socket.write_all(PARTIAL).await.unwrap();
        socket.flush().await.unwrap();
        // Let the bytes land on the client before the reset goes out.
        time::sleep(Duration::from_millis(50)).await;

        socket.set_linger(Some(Duration::ZERO)).unwrap();
        drop(socket);
    });

    let service = FetchService::new(
        Box::new(SimBus::with_ready_after(Duration::ZERO)),
        Box::new(SimModem::default()),
        Box::new(FixedResolver { target }),
        Box::new(MemoryCredentialStore::new()),
    );

    let mut sink: Vec<u8> = Vec::new();
    let config = config_for(target, "example.test", "/");
    let err = service.run(&config, &mut sink).await.unwrap_err();

    assert!(matches!(err, FetchError::Io(_)), "expected a mid-stream error, got {err:?}");
    assert_eq!(sink, PARTIAL, "bytes forwarded before the reset stay forwarded");
    server.await.unwrap();
}

#[tokio::test]
async fn connection_closes_after_a_sink_failure() {
    let (target, server) = serve_once(RESPONSE).await;

    let service = FetchService::new(
        Box::new(SimBus::with_ready_after(Duration::ZERO)),
        Box::new(SimModem::default()),
        Box::new(FixedResolver { target }),
        Box::new(MemoryCredentialStore::new()),
    );

    let mut sink = RefusingSink;
    let config = config_for(target, "example.test", "/");
    let err = service.run(&config, &mut sink).await.unwrap_err();

    assert!(matches!(err, FetchError::Io(_)), "expected a sink error, got {err:?}");

    // serve_once only returns once the client's close reaches it, so a
    // completed join is the close-after-error observation.
    let request: Vec<u8> = server.await.unwrap();
    assert_eq!(request, b"GET / HTTP/1.0\r\nHost: www.example.test\r\n\r\n");
}

#[tokio::test]
async fn tls_provisioning_failure_short_circuits_connect() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let target = resolved(listener.local_addr().unwrap());
    let installs = Arc::new(AtomicUsize::new(0));

    let service = FetchService::new(
        Box::new(SimBus::with_ready_after(Duration::ZERO)),
        Box::new(SimModem::default()),
        Box::new(FixedResolver { target }),
        Box::new(CountingStore::new(Arc::clone(&installs))),
    );

    let mut sink: Vec<u8> = Vec::new();
    let config = FetchConfig {
        tls: Some(TlsConfig {
            trust_anchor: b"not a certificate".to_vec(),
            tag: SecTag(7),
            hostname: "example.test".to_string(),
        }),
        ..config_for(target, "example.test", "/")
    };

    let err = service.run(&config, &mut sink).await.unwrap_err();

    assert!(
        matches!(err, FetchError::Connect(ConnectError::TrustAnchor(_))),
        "expected a trust anchor error, got {err:?}"
    );
    assert_eq!(
        installs.load(Ordering::SeqCst),
        1,
        "the anchor is registered before it is parsed"
    );
    assert!(sink.is_empty());
    assert_no_connection(&listener).await;
}
