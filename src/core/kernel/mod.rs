//! Transport kernel - exchange-agnostic HTTP plumbing.
//!
//! The kernel contains only transport logic and generic interfaces:
//!
//! - `RestClient`: unified HTTP client interface
//! - `ReqwestRest`: reqwest-backed implementation with connection pooling
//! - `Signer`: pluggable request-authentication seam
//!
//! No exchange-specific logic lives here. Exchange modules provide their
//! own `Signer` implementation and thin typed wrappers over `RestClient`;
//! tests inject their own `RestClient` to drive connectors offline.

pub mod rest;
pub mod signer;

pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{SignatureResult, Signer};
