//! # TLS Provisioning
//!
//! Everything a TLS-tagged connection needs before the TCP connect: the
//! in-memory credential store, trust-anchor decoding (PEM or raw DER) and
//! the session parameters handed to the connector. Provisioning runs in a
//! fixed order (install the anchor, assemble the root set from its tag,
//! fix the verification hostname) and any step failing means no connect
//! attempt is made at all.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio_rustls::TlsConnector;
use tokio_rustls::rustls::pki_types::{CertificateDer, InvalidDnsNameError, ServerName};
use tokio_rustls::rustls::{ClientConfig, RootCertStore};

use fetchr_common::debug;
use fetchr_common::tls::{CredentialError, CredentialKind, CredentialStore, SecTag};

/// Keyed in-memory credential storage.
///
/// Mirrors the one-shot registration discipline of a device keystore: each
/// (tag, kind) slot accepts exactly one install per process run.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slots: Mutex<HashMap<(SecTag, CredentialKind), Vec<u8>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn install(
        &self,
        tag: SecTag,
        kind: CredentialKind,
        bytes: &[u8],
    ) -> Result<(), CredentialError> {
        let mut slots = self.slots.lock().unwrap();
        if slots.contains_key(&(tag, kind)) {
            return Err(CredentialError::Occupied { tag, kind });
        }

        slots.insert((tag, kind), bytes.to_vec());
        debug!("registered {kind:?} under {tag} ({} bytes)", bytes.len());
        Ok(())
    }

    fn lookup(&self, tag: SecTag, kind: CredentialKind) -> Option<Vec<u8>> {
        self.slots.lock().unwrap().get(&(tag, kind)).cloned()
    }
}

/// The trust-anchor step of provisioning failed; the session cannot verify
/// anyone, so nothing gets connected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrustAnchorError {
    #[error("no CA certificate registered under {tag}")]
    Missing { tag: SecTag },
    #[error("trust anchor under {tag} parses as neither PEM nor DER")]
    Invalid { tag: SecTag },
}

/// The configured hostname cannot be used for certificate verification.
#[derive(Debug, Error)]
#[error("{hostname:?} is not a valid verification hostname")]
pub struct HostnameError {
    pub hostname: String,
    #[source]
    source: InvalidDnsNameError,
}

/// Builds the session's root set from the anchors registered under `tags`.
///
/// Every tag must hold a CA certificate that decodes to at least one usable
/// root; an empty root set would make the later handshake fail in a far less
/// explicable way.
pub fn assemble_roots(
    store: &dyn CredentialStore,
    tags: &[SecTag],
) -> Result<RootCertStore, TrustAnchorError> {
    let mut roots = RootCertStore::empty();

    for &tag in tags {
        let bytes = store
            .lookup(tag, CredentialKind::CaCertificate)
            .ok_or(TrustAnchorError::Missing { tag })?;

        let (added, _ignored) = roots.add_parsable_certificates(decode_certificates(&bytes));
        if added == 0 {
            return Err(TrustAnchorError::Invalid { tag });
        }
        debug!("{tag} contributed {added} trust anchor(s)");
    }

    Ok(roots)
}

/// Decodes an anchor blob: PEM when it contains certificate armor, raw DER
/// otherwise (the form embedded platforms register).
fn decode_certificates(bytes: &[u8]) -> Vec<CertificateDer<'static>> {
    let mut reader: &[u8] = bytes;
    let pem: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut reader)
        .filter_map(Result::ok)
        .collect();

    if pem.is_empty() {
        vec![CertificateDer::from(bytes.to_vec())]
    } else {
        pem
    }
}

/// Fixes the name the peer certificate must verify against.
pub fn verification_name(hostname: &str) -> Result<ServerName<'static>, HostnameError> {
    ServerName::try_from(hostname.to_string()).map_err(|source| HostnameError {
        hostname: hostname.to_string(),
        source,
    })
}

/// Client connector trusting exactly the assembled roots.
pub fn connector(roots: RootCertStore) -> TlsConnector {
    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    TlsConnector::from(Arc::new(config))
}




// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
