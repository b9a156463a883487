use crate::config::GatewayConfig;
use crate::domain::fields::{FieldSet, SIGNATURE_FIELD};
use crate::domain::ports::PaymentTransaction;
use crate::domain::signature::SigningContext;
use crate::domain::status::PaymentStatus;
use crate::error::{GatewayError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use subtle::ConstantTimeEq;

/// Hosted payment page every signed form is posted to. The endpoint itself is
/// unauthenticated; the signature is the only protection.
pub const PAYMENT_URL: &str = "https://paiement.systempay.fr/vads-payment/";

/// Response field carrying the transaction status.
pub const TRANS_STATUS_FIELD: &str = "vads_trans_status";

/// Response field carrying the gateway transaction id.
pub const TRANS_ID_FIELD: &str = "vads_trans_id";

/// Outcome of a successful callback verification.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedResponse {
    /// Parsed `vads_trans_status` value.
    pub status: PaymentStatus,
    /// The verified fields exactly as delivered, signature entry removed.
    pub fields: FieldSet,
}

/// The main entry point of the adapter.
///
/// `PaymentGateway` builds signed payment forms and verifies gateway
/// callbacks against one immutable [`SigningContext`]. It holds no mutable
/// state; field sets are assembled per call.
pub struct PaymentGateway {
    context: SigningContext,
    defaults: FieldSet,
}

impl PaymentGateway {
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        Ok(Self::new(config.signing_context()?, config.default_fields()))
    }

    pub fn new(context: SigningContext, defaults: FieldSet) -> Self {
        tracing::debug!(algorithm = %context.algorithm(), "signing context ready");
        Self { context, defaults }
    }

    pub fn payment_url(&self) -> &'static str {
        PAYMENT_URL
    }

    /// Assembles the per-transaction field set: the configured defaults plus
    /// the transaction's amount, currency, zero-padded six-digit id and UTC
    /// timestamp. Extra fields (customer, shipping, ...) can be merged on top
    /// before building the form.
    ///
    /// The caller must have assigned a gateway transaction id beforehand.
    pub fn transaction_fields(&self, tx: &dyn PaymentTransaction) -> Result<FieldSet> {
        self.transaction_fields_at(tx, Utc::now())
    }

    /// Same as [`Self::transaction_fields`] with an explicit timestamp.
    pub fn transaction_fields_at(
        &self,
        tx: &dyn PaymentTransaction,
        now: DateTime<Utc>,
    ) -> Result<FieldSet> {
        let trans_id = tx
            .gateway_transaction_id()
            .ok_or(GatewayError::MissingTransactionId)?;

        let mut fields = self.defaults.clone();
        fields.set("amount", tx.amount());
        fields.set("currency", tx.currency());
        fields.set("trans_id", format!("{trans_id:06}"));
        fields.set("trans_date", now.format("%Y%m%d%H%M%S"));
        Ok(fields)
    }

    /// Prefixes every field, signs the prefixed set and adds the single
    /// unprefixed `signature` entry. The returned set is ready to be rendered
    /// as hidden form inputs posted to [`PAYMENT_URL`]; the secret key never
    /// appears in it.
    pub fn build_form_fields(&self, fields: &FieldSet) -> FieldSet {
        let mut form = fields.prefixed();
        let signature = self.context.sign(&form);
        form.set(SIGNATURE_FIELD, signature);
        tracing::debug!(fields = form.len(), "payment form built");
        form
    }

    /// Checks the `signature` entry of a gateway callback.
    ///
    /// Only `vads_`-prefixed fields participate in the recomputation, so the
    /// signature never covers itself and unprefixed extras are tolerated.
    /// The comparison runs in constant time with exact string equality
    /// semantics; any mismatch is an authentication failure.
    pub fn verify_response(&self, response: &FieldSet) -> Result<VerifiedResponse> {
        let mut fields = response.clone();
        let provided = fields
            .remove(SIGNATURE_FIELD)
            .ok_or(GatewayError::SignatureMissing)?;
        let expected = self.context.sign(&fields);

        if !bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
            tracing::warn!("callback signature mismatch");
            return Err(GatewayError::SignatureMismatch);
        }

        let status = fields
            .get(TRANS_STATUS_FIELD)
            .map(PaymentStatus::from)
            .ok_or(GatewayError::MissingField(TRANS_STATUS_FIELD))?;

        Ok(VerifiedResponse { status, fields })
    }

    /// Verifies a callback and applies its outcome to the transaction:
    /// status update, response log (Base64-encoded JSON of the verified
    /// fields), paid or refund transition. Nothing is applied when
    /// verification fails.
    pub fn handle_response(
        &self,
        tx: &mut dyn PaymentTransaction,
        response: &FieldSet,
    ) -> Result<VerifiedResponse> {
        let verified = self.verify_response(response)?;

        tx.change_status(verified.status.clone());
        tx.set_response_log(BASE64.encode(serde_json::to_vec(&verified.fields)?));

        if verified.status.is_successful() {
            tx.mark_paid();
        }
        if verified.status == PaymentStatus::Cancelled {
            tx.refund();
        }

        Ok(verified)
    }

    /// Gateway transaction id carried by a callback, if present.
    pub fn transaction_id(response: &FieldSet) -> Option<&str> {
        response.get(TRANS_ID_FIELD)
    }
}
