use crate::core::errors::ExchangeError;
use crate::core::kernel::{SignatureResult, Signer};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

/// Delta Exchange HMAC-SHA256 signer.
///
/// The canonical message is `method + path + body + timestamp` with no
/// delimiters, timestamp in decimal unix seconds, and the digest is
/// lowercase hex. The concatenation order is part of the wire contract:
/// a transposed message still produces a well-formed signature, which the
/// exchange then rejects as an authentication failure with no better
/// diagnostic, so it must never be reordered.
#[derive(Clone)]
pub struct DeltaSigner {
    api_key: String,
    secret_key: String,
}

impl DeltaSigner {
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key,
        }
    }

    /// Compute the signature for one request.
    pub fn generate_signature(
        &self,
        method: &str,
        path: &str,
        body: &str,
        timestamp: u64,
    ) -> Result<String, ExchangeError> {
        let message = format!("{}{}{}{}", method, path, body, timestamp);

        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key: {}", e)))?;

        mac.update(message.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl Signer for DeltaSigner {
    fn sign_request(
        &self,
        method: &str,
        endpoint: &str,
        query_string: &str,
        body: &[u8],
        timestamp: u64,
    ) -> SignatureResult {
        // Query parameters are signed as part of the path
        let path = if query_string.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}?{}", endpoint, query_string)
        };

        let body_str = std::str::from_utf8(body)
            .map_err(|e| ExchangeError::AuthError(format!("Invalid body encoding: {}", e)))?;

        let signature = self.generate_signature(method, &path, body_str, timestamp)?;

        let mut headers = HashMap::new();
        headers.insert("api-key".to_string(), self.api_key.clone());
        headers.insert("signature".to_string(), signature);
        headers.insert("timestamp".to_string(), timestamp.to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        // Query params still go on the URL, unchanged
        let signed_params = if query_string.is_empty() {
            Vec::new()
        } else {
            query_string
                .split('&')
                .filter_map(|param| {
                    param
                        .split_once('=')
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                })
                .collect()
        };

        Ok((headers, signed_params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> DeltaSigner {
        DeltaSigner::new("key".to_string(), "s3cr3t".to_string())
    }

    #[test]
    fn signature_matches_reference_vector() {
        // HMAC-SHA256("GET/v2/positions1700000000", "s3cr3t")
        let sig = signer()
            .generate_signature("GET", "/v2/positions", "", 1_700_000_000)
            .unwrap();
        assert_eq!(
            sig,
            "6c03c9863dbb40c5781bf3d0ccdc119505d2cb8d598e1b39d136e450beace848"
        );
    }

    #[test]
    fn signature_with_body_matches_reference_vector() {
        let body = r#"{"product_id":27,"size":"5","side":"buy","order_type":"market_order"}"#;
        let sig = signer()
            .generate_signature("POST", "/v2/orders", body, 1_700_000_000)
            .unwrap();
        assert_eq!(
            sig,
            "9c4ccde8a314c15f1ea08c42b283c7ebb6e2dd81bdadf756a3d4d0e09aa35128"
        );
    }

    #[test]
    fn signature_is_deterministic() {
        let a = signer()
            .generate_signature("GET", "/v2/positions", "", 1_700_000_000)
            .unwrap();
        let b = signer()
            .generate_signature("GET", "/v2/positions", "", 1_700_000_000)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn changing_any_input_changes_signature() {
        let base = signer()
            .generate_signature("GET", "/v2/positions", "", 1_700_000_000)
            .unwrap();

        let other_ts = signer()
            .generate_signature("GET", "/v2/positions", "", 1_700_000_001)
            .unwrap();
        assert_eq!(
            other_ts,
            "3df36b1a8bfcde852344aaf638fbc4ccfa29569dc4e0b2295a9f6b4b85fcd2d3"
        );
        assert_ne!(base, other_ts);

        let other_method = signer()
            .generate_signature("POST", "/v2/positions", "", 1_700_000_000)
            .unwrap();
        assert_ne!(base, other_method);

        let other_path = signer()
            .generate_signature("GET", "/v2/orders", "", 1_700_000_000)
            .unwrap();
        assert_ne!(base, other_path);

        let other_key = DeltaSigner::new("key".to_string(), "s3cr3t2".to_string())
            .generate_signature("GET", "/v2/positions", "", 1_700_000_000)
            .unwrap();
        assert_ne!(base, other_key);
    }

    #[test]
    fn sign_request_emits_delta_headers() {
        let (headers, params) = signer()
            .sign_request("GET", "/v2/positions", "", &[], 1_700_000_000)
            .unwrap();

        assert_eq!(headers.get("api-key").unwrap(), "key");
        assert_eq!(headers.get("timestamp").unwrap(), "1700000000");
        assert_eq!(
            headers.get("signature").unwrap(),
            "6c03c9863dbb40c5781bf3d0ccdc119505d2cb8d598e1b39d136e450beace848"
        );
        assert!(params.is_empty());
    }
}
