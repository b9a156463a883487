use crate::domain::fields::FieldSet;
use crate::domain::signature::{HashAlgorithm, SigningContext};
use crate::error::Result;
use serde::Deserialize;

/// Mode value selecting the development key; any other mode is production.
/// The comparison is case-sensitive.
pub const TEST_MODE: &str = "TEST";

/// Static gateway parameters, typically deserialized from the embedding
/// application's configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Signature construction: `sha1` or `hmac_sha256`.
    pub hash_method: String,
    /// Secret key used in TEST mode.
    pub key_dev: String,
    /// Secret key used in production.
    pub key_prod: String,
    /// Default field values submitted with every payment form.
    pub vads: DefaultFields,
}

/// The `vads_*` values shared by every transaction of the merchant.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultFields {
    pub language: String,
    pub return_mode: String,
    pub action_mode: String,
    pub ctx_mode: String,
    pub page_action: String,
    pub payment_config: String,
    pub site_id: String,
    pub version: String,
    pub url_return: String,
}

impl GatewayConfig {
    /// Resolves the signing context for the configured mode.
    ///
    /// Fails when `hash_method` is not a supported identifier or when the
    /// selected key is empty.
    pub fn signing_context(&self) -> Result<SigningContext> {
        let algorithm: HashAlgorithm = self.hash_method.parse()?;
        let key = if self.vads.ctx_mode == TEST_MODE {
            &self.key_dev
        } else {
            &self.key_prod
        };
        SigningContext::new(algorithm, key.clone())
    }

    /// The configured defaults as a field set, under unprefixed names.
    pub fn default_fields(&self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields.set("language", &self.vads.language);
        fields.set("return_mode", &self.vads.return_mode);
        fields.set("action_mode", &self.vads.action_mode);
        fields.set("ctx_mode", &self.vads.ctx_mode);
        fields.set("page_action", &self.vads.page_action);
        fields.set("payment_config", &self.vads.payment_config);
        fields.set("site_id", &self.vads.site_id);
        fields.set("version", &self.vads.version);
        fields.set("url_return", &self.vads.url_return);
        fields
    }
}
