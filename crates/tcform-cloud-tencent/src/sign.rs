//! TC3-HMAC-SHA256 request signing

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

pub const ALGORITHM: &str = "TC3-HMAC-SHA256";
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";
const SIGNED_HEADERS: &str = "content-type;host";

/// Secret pair plus the optional STS token
#[derive(Clone)]
pub struct Credentials {
    pub secret_id: String,
    pub secret_key: String,
    pub token: Option<String>,
}

impl Credentials {
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"***")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Value of the `Authorization` header for a JSON POST to `/`
pub fn authorization(
    credentials: &Credentials,
    service: &str,
    host: &str,
    payload: &[u8],
    timestamp: DateTime<Utc>,
) -> String {
    let date = timestamp.format("%Y-%m-%d").to_string();

    let canonical_request = format!(
        "POST\n/\n\ncontent-type:{}\nhost:{}\n\n{}\n{}",
        CONTENT_TYPE,
        host,
        SIGNED_HEADERS,
        sha256_hex(payload)
    );

    let credential_scope = format!("{}/{}/tc3_request", date, service);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        timestamp.timestamp(),
        credential_scope,
        sha256_hex(canonical_request.as_bytes())
    );

    let secret_date = hmac_sha256(
        format!("TC3{}", credentials.secret_key).as_bytes(),
        date.as_bytes(),
    );
    let secret_service = hmac_sha256(&secret_date, service.as_bytes());
    let secret_signing = hmac_sha256(&secret_service, b"tc3_request");
    let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes()));

    format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, credentials.secret_id, credential_scope, SIGNED_HEADERS, signature
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ts: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(ts, 0).unwrap()
    }

    #[test]
    fn test_authorization_shape() {
        let credentials = Credentials::new("AKIDEXAMPLE", "secret");
        let header = authorization(
            &credentials,
            "vpc",
            "vpc.tencentcloudapi.com",
            br#"{"AddressIds":["eip-1"]}"#,
            at(1_700_000_000),
        );

        assert!(header.starts_with(
            "TC3-HMAC-SHA256 Credential=AKIDEXAMPLE/2023-11-14/vpc/tc3_request, SignedHeaders=content-type;host, Signature="
        ));
        let signature = header.rsplit('=').next().unwrap();
        assert_eq!(signature.len(), 64);
    }

    #[test]
    fn test_known_signatures() {
        let payload =
            br#"{"Limit": 1, "Filters": [{"Values": ["\u672a\u547d\u540d"], "Name": "instance-name"}]}"#;
        assert_eq!(
            sha256_hex(payload),
            "35e9c5b0e3ae67532d3c9f17ead6c90222632e5b1ff7f6e89887f1398934f064"
        );

        let cases = [
            (
                "Gu5t9xGARNpq86cd98joQYCN3*******",
                "2230eefd229f582d8b1b891af7107b91597240707d778ab3738f756258d7652c",
            ),
            (
                "Gu5t9xGARNpq86cd98joQYCN3EXAMPLE",
                "72e494ea809ad7a8c8f7a4507b9bddcbaa8e581f516e8da2f66e2c5a96525168",
            ),
        ];
        for (secret_key, signature) in cases {
            let credentials = Credentials::new("AKIDz8krbsJ5yKBZQpn74WFkmLPx3EXAMPLE", secret_key);
            let header = authorization(
                &credentials,
                "cvm",
                "cvm.tencentcloudapi.com",
                payload,
                at(1_551_113_065),
            );
            assert_eq!(
                header,
                format!(
                    "TC3-HMAC-SHA256 Credential=AKIDz8krbsJ5yKBZQpn74WFkmLPx3EXAMPLE/2019-02-25/cvm/tc3_request, SignedHeaders=content-type;host, Signature={}",
                    signature
                )
            );
        }
    }

    #[test]
    fn test_signature_depends_on_payload_and_key() {
        let credentials = Credentials::new("AKIDEXAMPLE", "secret");
        let host = "cfs.tencentcloudapi.com";
        let a = authorization(&credentials, "cfs", host, b"{}", at(1_700_000_000));
        let b = authorization(&credentials, "cfs", host, b"{\"x\":1}", at(1_700_000_000));
        let c = authorization(
            &Credentials::new("AKIDEXAMPLE", "other"),
            "cfs",
            host,
            b"{}",
            at(1_700_000_000),
        );

        assert_eq!(a, authorization(&credentials, "cfs", host, b"{}", at(1_700_000_000)));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_debug_hides_secret() {
        let credentials = Credentials::new("AKID", "topsecret").with_token(Some("tok".into()));
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("topsecret"));
        assert!(debug.contains("***"));
    }
}
