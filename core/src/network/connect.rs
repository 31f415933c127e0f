//! # Connection Establisher
//!
//! Turns one resolved candidate into a live [`Connection`], plain or TLS.
//! TLS sessions are provisioned *before* the TCP connect (anchor install,
//! root assembly, verification hostname), so a provisioning mistake never
//! produces a half-open socket. Each [`ConnectError`] variant names the
//! step that failed.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadBuf};
use tokio::net::{TcpSocket, TcpStream};
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::pki_types::ServerName;

use fetchr_common::debug;
use fetchr_common::network::addr::ResolvedAddr;
use fetchr_common::tls::{CredentialError, CredentialKind, CredentialStore, TlsConfig};

use crate::tls::{self, HostnameError, TrustAnchorError};

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("cannot create socket: {source}")]
    Socket {
        #[source]
        source: io::Error,
    },
    #[error("cannot register trust anchor")]
    Credential(#[from] CredentialError),
    #[error("cannot assemble session trust anchors")]
    TrustAnchor(#[from] TrustAnchorError),
    #[error("cannot set verification hostname")]
    Hostname(#[from] HostnameError),
    #[error("cannot connect to remote: {source}")]
    Connect {
        #[source]
        source: io::Error,
    },
    #[error("TLS handshake failed: {source}")]
    Handshake {
        #[source]
        source: io::Error,
    },
}

/// One established stream to the remote peer.
///
/// Reads and writes forward to whichever transport came up, so the
/// request/response driver never branches on TLS.
#[derive(Debug)]
pub enum Connection {
    Plain {
        stream: TcpStream,
        peer: ResolvedAddr,
    },
    Tls {
        stream: Box<TlsStream<TcpStream>>,
        peer: ResolvedAddr,
    },
}

impl Connection {
    pub fn peer(&self) -> ResolvedAddr {
        match self {
            Connection::Plain { peer, .. } | Connection::Tls { peer, .. } => *peer,
        }
    }

    /// Shuts the write side down. Taking `self` by value means close happens
    /// at most once; dropping without calling it still releases the socket.
    pub async fn close(mut self) -> io::Result<()> {
        self.shutdown().await
    }
}

impl AsyncRead for Connection {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Connection::Plain { stream, .. } => Pin::new(stream).poll_read(cx, buf),
            Connection::Tls { stream, .. } => Pin::new(stream).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for Connection {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            Connection::Plain { stream, .. } => Pin::new(stream).poll_write(cx, buf),
            Connection::Tls { stream, .. } => Pin::new(stream).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Connection::Plain { stream, .. } => Pin::new(stream).poll_flush(cx),
            Connection::Tls { stream, .. } => Pin::new(stream).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Connection::Plain { stream, .. } => Pin::new(stream).poll_shutdown(cx),
            Connection::Tls { stream, .. } => Pin::new(stream).poll_shutdown(cx),
        }
    }
}

/// Connects to `target`, provisioning a TLS session first when `tls` is set.
pub async fn establish(
    target: ResolvedAddr,
    tls: Option<&TlsConfig>,
    store: &dyn CredentialStore,
) -> Result<Connection, ConnectError> {
    let socket: TcpSocket = TcpSocket::new_v4().map_err(|source| ConnectError::Socket { source })?;

    // Provisioning failures must leave the remote completely untouched.
    let session = match tls {
        Some(params) => Some(provision(params, store)?),
        None => None,
    };

    let stream: TcpStream = socket
        .connect(target.socket_addr())
        .await
        .map_err(|source| ConnectError::Connect { source })?;
    debug!("connected to {target}");

    match session {
        Some((connector, name)) => {
            let stream = connector
                .connect(name, stream)
                .await
                .map_err(|source| ConnectError::Handshake { source })?;
            debug!("TLS session established with {target}");
            Ok(Connection::Tls { stream: Box::new(stream), peer: target })
        }
        None => Ok(Connection::Plain { stream, peer: target }),
    }
}

fn provision(
    params: &TlsConfig,
    store: &dyn CredentialStore,
) -> Result<(TlsConnector, ServerName<'static>), ConnectError> {
    store.install(params.tag, CredentialKind::CaCertificate, &params.trust_anchor)?;
    let roots = tls::assemble_roots(store, &[params.tag])?;
    let name: ServerName<'static> = tls::verification_name(&params.hostname)?;
    Ok((tls::connector(roots), name))
}



// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
