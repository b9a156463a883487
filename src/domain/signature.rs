use crate::domain::fields::{FIELD_PREFIX, FieldSet};
use crate::error::{GatewayError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha1::{Digest, Sha1};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;

type HmacSha256 = Hmac<Sha256>;

/// Separator between canonicalized values. A value containing `+` is passed
/// through unescaped; the gateway canonicalizes the same way.
const VALUE_SEPARATOR: &str = "+";

/// The two signature constructions accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// Hex-encoded SHA-1 digest of the canonical string.
    Sha1,
    /// Base64-encoded HMAC-SHA256 of the canonical string, keyed with the
    /// secret key.
    HmacSha256,
}

impl HashAlgorithm {
    pub const ACCEPTED: [&'static str; 2] = ["sha1", "hmac_sha256"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::HmacSha256 => "hmac_sha256",
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = GatewayError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "sha1" => Ok(Self::Sha1),
            "hmac_sha256" => Ok(Self::HmacSha256),
            other => Err(GatewayError::Configuration(format!(
                "hash method '{}' is not supported, possible values are: {}",
                other,
                Self::ACCEPTED.join(", ")
            ))),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The algorithm and secret key used for every signature in one mode.
///
/// Constructed once from configuration and read-only afterwards; safe to
/// share across any number of concurrent signature computations.
#[derive(Clone)]
pub struct SigningContext {
    algorithm: HashAlgorithm,
    key: String,
}

impl SigningContext {
    /// Fails on an empty key rather than silently signing with one.
    pub fn new(algorithm: HashAlgorithm, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(GatewayError::Configuration(
                "no signing key configured for the active mode".to_string(),
            ));
        }
        Ok(Self { algorithm, key })
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Computes the signature over the `vads_`-prefixed entries of `fields`.
    ///
    /// Entries are taken in ascending byte-wise name order and only prefixed
    /// names participate, so a `signature` entry never signs itself. The
    /// values are joined with `+`, the secret key is appended as the final
    /// token, and the result is digested according to the algorithm.
    pub fn sign(&self, fields: &FieldSet) -> String {
        let mut values: Vec<&str> = fields
            .iter()
            .filter(|(name, _)| name.starts_with(FIELD_PREFIX))
            .map(|(_, value)| value)
            .collect();
        values.push(&self.key);
        let canonical = values.join(VALUE_SEPARATOR);

        match self.algorithm {
            HashAlgorithm::Sha1 => hex::encode(Sha1::digest(canonical.as_bytes())),
            HashAlgorithm::HmacSha256 => {
                // HMAC-SHA256 accepts keys of any size per RFC 2104, so
                // `new_from_slice` only fails if the Hmac implementation is
                // broken.
                let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
                    .expect("HMAC-SHA256 accepts any key size");
                mac.update(canonical.as_bytes());
                BASE64.encode(mac.finalize().into_bytes())
            }
        }
    }
}

impl fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The key stays out of debug output.
        f.debug_struct("SigningContext")
            .field("algorithm", &self.algorithm)
            .field("key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sha1_context() -> SigningContext {
        SigningContext::new(HashAlgorithm::Sha1, "secret123").unwrap()
    }

    #[test]
    fn test_hash_algorithm_parsing() {
        assert_eq!("sha1".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha1);
        assert_eq!(
            "hmac_sha256".parse::<HashAlgorithm>().unwrap(),
            HashAlgorithm::HmacSha256
        );
    }

    #[test]
    fn test_unknown_hash_algorithm_is_rejected() {
        let err = "md5".parse::<HashAlgorithm>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("md5"));
        assert!(message.contains("sha1, hmac_sha256"));
    }

    #[test]
    fn test_empty_key_is_rejected() {
        assert!(SigningContext::new(HashAlgorithm::Sha1, "").is_err());
    }

    #[test]
    fn test_sha1_signature_of_known_fields() {
        let fields = FieldSet::from_iter([("vads_amount", "1000"), ("vads_currency", "978")]);
        // sha1("1000+978+secret123")
        assert_eq!(
            sha1_context().sign(&fields),
            "ddaacd0be79172f23d835aba8488053047c7cf9b"
        );
    }

    #[test]
    fn test_hmac_sha256_signature_of_known_fields() {
        let context = SigningContext::new(HashAlgorithm::HmacSha256, "secret123").unwrap();
        let fields = FieldSet::from_iter([("vads_amount", "1000"), ("vads_currency", "978")]);
        // base64(hmac_sha256("1000+978+secret123", key = "secret123"))
        assert_eq!(
            context.sign(&fields),
            "Jt+27bfVRs23OuXWuYyZZrIYodM0UtADkpE/JyDyAaI="
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let fields = FieldSet::from_iter([("vads_amount", "1000"), ("vads_currency", "978")]);
        let context = sha1_context();
        assert_eq!(context.sign(&fields), context.sign(&fields));
    }

    #[test]
    fn test_signature_ignores_insertion_order() {
        let mut first = FieldSet::new();
        first.set("vads_amount", "1000");
        first.set("vads_currency", "978");

        let mut second = FieldSet::new();
        second.set("vads_currency", "978");
        second.set("vads_amount", "1000");

        let context = sha1_context();
        assert_eq!(context.sign(&first), context.sign(&second));
    }

    #[test]
    fn test_unprefixed_fields_are_excluded() {
        let with_extras = FieldSet::from_iter([
            ("vads_amount", "1000"),
            ("vads_currency", "978"),
            ("signature", "bogus"),
            ("extra", "ignored"),
        ]);
        let only_prefixed = FieldSet::from_iter([("vads_amount", "1000"), ("vads_currency", "978")]);

        let context = sha1_context();
        assert_eq!(context.sign(&with_extras), context.sign(&only_prefixed));
    }

    #[test]
    fn test_separator_in_value_is_not_escaped() {
        let context = SigningContext::new(HashAlgorithm::Sha1, "k").unwrap();
        let fields = FieldSet::from_iter([("vads_amount", "10"), ("vads_label", "a+b")]);
        // sha1("10+a+b+k"): the embedded separator flows through unchanged.
        assert_eq!(context.sign(&fields), "5787b09c133bdedc23886939c4e588b1933d764d");
    }

    #[test]
    fn test_sha1_signature_shape() {
        let fields = FieldSet::from_iter([("vads_amount", "1000")]);
        let signature = sha1_context().sign(&fields);
        assert_eq!(signature.len(), 40);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hmac_sha256_signature_shape() {
        let context = SigningContext::new(HashAlgorithm::HmacSha256, "secret123").unwrap();
        let fields = FieldSet::from_iter([("vads_amount", "1000")]);
        let signature = context.sign(&fields);
        // 32 raw bytes encode to 44 Base64 characters.
        assert_eq!(signature.len(), 44);
        assert!(signature.ends_with('='));
    }

    #[test]
    fn test_debug_does_not_leak_the_key() {
        let context = sha1_context();
        let debugged = format!("{context:?}");
        assert!(!debugged.contains("secret123"));
    }
}
