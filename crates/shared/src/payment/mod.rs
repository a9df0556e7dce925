use crate::{
    abstract_trait::PaymentGatewayTrait, config::PaymentConfig, domain::responses::GatewayOrder,
    errors::ServiceError,
};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{error, info};

type HmacSha256 = Hmac<Sha256>;

/// Razorpay client. Amounts cross this boundary in whole currency units
/// and are converted to the gateway's minor unit (paise) here.
pub struct RazorpayGateway {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    base_url: String,
}

impl RazorpayGateway {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PaymentGatewayTrait for RazorpayGateway {
    async fn create_gateway_order(
        &self,
        amount: i64,
        receipt: &str,
    ) -> Result<GatewayOrder, ServiceError> {
        info!("💳 Creating gateway order for receipt {receipt}");

        let body = serde_json::json!({
            "amount": amount * 100,
            "currency": "INR",
            "receipt": receipt,
        });

        let response = self
            .http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            error!(
                "❌ Gateway order creation failed for {receipt}: HTTP {}",
                response.status()
            );
            return Err(ServiceError::Gateway(format!(
                "create order returned HTTP {}",
                response.status()
            )));
        }

        let order = response.json::<GatewayOrder>().await?;

        info!("✅ Gateway order {} created for {receipt}", order.id);
        Ok(order)
    }

    /// HMAC-SHA256 over `"<gateway_order_id>|<payment_id>"` with the key
    /// secret, hex-encoded by the gateway. `verify_slice` compares in
    /// constant time.
    fn verify_signature(&self, gateway_order_id: &str, payment_id: &str, signature: &str) -> bool {
        let mut mac = HmacSha256::new_from_slice(self.key_secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(gateway_order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());

        let Ok(raw) = hex::decode(signature) else {
            return false;
        };

        mac.verify_slice(&raw).is_ok()
    }

    fn key_id(&self) -> &str {
        &self.key_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(secret: &str) -> RazorpayGateway {
        RazorpayGateway::new(&PaymentConfig {
            key_id: "rzp_test_key".into(),
            key_secret: secret.into(),
            base_url: "https://api.razorpay.com".into(),
        })
    }

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_a_valid_signature() {
        let gw = gateway("secret");
        let signature = sign("secret", "order_abc", "pay_xyz");
        assert!(gw.verify_signature("order_abc", "pay_xyz", &signature));
    }

    #[test]
    fn rejects_a_tampered_payment_id() {
        let gw = gateway("secret");
        let signature = sign("secret", "order_abc", "pay_xyz");
        assert!(!gw.verify_signature("order_abc", "pay_other", &signature));
    }

    #[test]
    fn rejects_a_signature_from_another_secret() {
        let gw = gateway("secret");
        let signature = sign("another", "order_abc", "pay_xyz");
        assert!(!gw.verify_signature("order_abc", "pay_xyz", &signature));
    }

    #[test]
    fn rejects_garbage_that_is_not_hex() {
        let gw = gateway("secret");
        assert!(!gw.verify_signature("order_abc", "pay_xyz", "not-hex!"));
    }
}
