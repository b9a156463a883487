use systempay::config::GatewayConfig;
use systempay::domain::ports::PaymentTransaction;
use systempay::domain::status::PaymentStatus;

pub fn fixture_config() -> GatewayConfig {
    serde_json::from_str(include_str!("../fixtures/config.json")).unwrap()
}

/// Minimal transaction record standing in for the merchant's model.
#[derive(Default)]
pub struct RecordedTransaction {
    pub gateway_id: Option<u32>,
    pub amount: u64,
    pub currency: u16,
    pub status: Option<PaymentStatus>,
    pub response_log: Option<String>,
    pub paid: bool,
    pub refunded: bool,
}

impl PaymentTransaction for RecordedTransaction {
    fn gateway_transaction_id(&self) -> Option<u32> {
        self.gateway_id
    }

    fn amount(&self) -> u64 {
        self.amount
    }

    fn currency(&self) -> u16 {
        self.currency
    }

    fn change_status(&mut self, status: PaymentStatus) {
        self.status = Some(status);
    }

    fn set_response_log(&mut self, log: String) {
        self.response_log = Some(log);
    }

    fn mark_paid(&mut self) {
        self.paid = true;
    }

    fn refund(&mut self) {
        self.refunded = true;
    }
}
