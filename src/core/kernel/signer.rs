use crate::core::errors::ExchangeError;
use std::collections::HashMap;

/// Result type for signing operations: (headers, `query_params`)
pub type SignatureResult = Result<(HashMap<String, String>, Vec<(String, String)>), ExchangeError>;

/// Signer trait for request authentication.
///
/// Implementations produce whatever headers and query parameters the
/// exchange's authentication scheme requires. Signing must be a pure
/// function of its inputs so it can be unit tested without network access.
pub trait Signer: Send + Sync {
    /// Sign a request and return headers and query parameters.
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `endpoint` - API endpoint path
    /// * `query_string` - Query string (without leading '?')
    /// * `body` - Raw request body bytes; empty when the request has none
    /// * `timestamp` - Request timestamp in unix seconds
    fn sign_request(
        &self,
        method: &str,
        endpoint: &str,
        query_string: &str,
        body: &[u8],
        timestamp: u64,
    ) -> SignatureResult;
}
