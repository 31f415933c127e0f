//! # TLS Credential Model
//!
//! Trust anchors are registered under numeric security tags in a credential
//! store, then referenced by tag when a session is provisioned. The store is
//! a trait so tests and future platform keystores can stand in for the
//! in-memory one.

use std::fmt;

use thiserror::Error;

/// Numeric slot a credential is registered under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SecTag(pub u32);

impl fmt::Display for SecTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sec-tag {}", self.0)
    }
}

/// What a registered credential is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CredentialKind {
    /// A CA certificate used to verify the peer.
    CaCertificate,
}

/// TLS parameters for one fetch.
#[derive(Clone, Debug)]
pub struct TlsConfig {
    /// Trust anchor bytes, PEM or raw DER.
    pub trust_anchor: Vec<u8>,
    /// Tag the anchor is registered under.
    pub tag: SecTag,
    /// Name the peer certificate must verify against.
    pub hostname: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// Each slot takes exactly one registration per run.
    #[error("{kind:?} already registered under {tag}")]
    Occupied { tag: SecTag, kind: CredentialKind },
}

/// Keyed storage for TLS credentials.
pub trait CredentialStore: Send + Sync {
    /// Registers `bytes` under the slot. Fails if the slot is occupied.
    fn install(&self, tag: SecTag, kind: CredentialKind, bytes: &[u8]) -> Result<(), CredentialError>;

    /// Returns a copy of the credential registered under the slot.
    fn lookup(&self, tag: SecTag, kind: CredentialKind) -> Option<Vec<u8>>;
}
