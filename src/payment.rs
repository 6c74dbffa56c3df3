//! # Payment Tokens
//!
//! On placement every order gets a token encoding a UPI payment request: who to pay,
//! how much, and a reference tying the payment back to the order.
//!
//! ```text
//! upi://pay?pa=<upi id>&pn=<payee>&am=<amount, 2dp>&tn=<note>&cu=<currency>&mc=<code>&tr=ORD<order>
//! ```
//!
//! [`UpiTokenIssuer`] wraps that URI into a `data:` URI. Placement treats any
//! [`TokenGenerationError`] as non-fatal.

use crate::config::PaymentConfig;
use crate::model::OrderId;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;
use urlencoding::encode;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TokenGenerationError {
    /// Amount is zero, negative, NaN or infinite.
    #[error("invalid amount for {order}: {amount}")]
    InvalidAmount { order: OrderId, amount: f64 },

    #[error("cannot encode payment request: {0}")]
    Encoding(String),
}

/// Produces the payment token attached to a freshly placed order.
#[async_trait]
pub trait PaymentTokenIssuer: Send + Sync {
    async fn issue(&self, order_id: OrderId, amount: f64) -> Result<String, TokenGenerationError>;
}

/// Issues `data:text/plain;base64,` tokens carrying a UPI deep link.
#[derive(Debug, Clone)]
pub struct UpiTokenIssuer {
    config: PaymentConfig,
}

impl UpiTokenIssuer {
    pub fn new(config: PaymentConfig) -> Self {
        Self { config }
    }

    /// The bare `upi://pay` URI for an order.
    pub fn payment_uri(&self, order_id: OrderId, amount: f64) -> Result<String, TokenGenerationError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(TokenGenerationError::InvalidAmount {
                order: order_id,
                amount,
            });
        }
        let payee = self.config.upi_id.trim();
        if payee.is_empty() || payee.contains(|c: char| c.is_whitespace() || c == '&' || c == '=') {
            return Err(TokenGenerationError::Encoding(format!("bad UPI id {:?}", self.config.upi_id)));
        }

        let note = format!("{} Order #{}", self.config.note_prefix, order_id.0);
        let mut uri = format!(
            "upi://pay?pa={}&pn={}&am={:.2}&tn={}&cu={}",
            payee,
            encode(&self.config.merchant_name),
            amount,
            encode(&note),
            self.config.currency,
        );
        if !self.config.merchant_code.is_empty() {
            uri.push_str(&format!("&mc={}", self.config.merchant_code));
        }
        uri.push_str(&format!("&tr=ORD{}", order_id.0));
        Ok(uri)
    }
}

#[async_trait]
impl PaymentTokenIssuer for UpiTokenIssuer {
    async fn issue(&self, order_id: OrderId, amount: f64) -> Result<String, TokenGenerationError> {
        let uri = self.payment_uri(order_id, amount)?;
        Ok(format!("data:text/plain;base64,{}", STANDARD.encode(uri)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> UpiTokenIssuer {
        UpiTokenIssuer::new(PaymentConfig::default())
    }

    #[test]
    fn test_payment_uri_layout() {
        let uri = issuer().payment_uri(OrderId(42), 13.0).unwrap();
        assert_eq!(
            uri,
            "upi://pay?pa=8125358163@ybl&pn=Arruri%20Bharath&am=13.00\
             &tn=Order%20Payment%20-%20Order%20%2342&cu=INR&mc=5814&tr=ORD42"
        );
    }

    #[test]
    fn test_empty_merchant_code_is_omitted() {
        let issuer = UpiTokenIssuer::new(PaymentConfig {
            merchant_code: String::new(),
            ..PaymentConfig::default()
        });
        let uri = issuer.payment_uri(OrderId(1), 2.5).unwrap();
        assert!(uri.ends_with("&cu=INR&tr=ORD1"));
    }

    #[test]
    fn test_free_text_fields_are_percent_encoded() {
        let issuer = UpiTokenIssuer::new(PaymentConfig {
            merchant_name: "Dosa & Co (2)!~".into(),
            note_prefix: "a=b".into(),
            ..PaymentConfig::default()
        });
        let uri = issuer.payment_uri(OrderId(7), 1.0).unwrap();
        assert!(uri.contains("&pn=Dosa%20%26%20Co%20%282%29%21~&"), "{}", uri);
        assert!(uri.contains("&tn=a%3Db%20Order%20%237&"), "{}", uri);
    }

    #[tokio::test]
    async fn test_issue_wraps_uri_as_data_uri() {
        let issuer = issuer();
        let token = issuer.issue(OrderId(3), 99.999).await.unwrap();
        let encoded = token.strip_prefix("data:text/plain;base64,").unwrap();
        let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, issuer.payment_uri(OrderId(3), 99.999).unwrap());
        assert!(decoded.contains("&am=100.00&"));
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        for amount in [0.0, -4.0, f64::NAN] {
            let err = issuer().issue(OrderId(1), amount).await.unwrap_err();
            assert!(matches!(err, TokenGenerationError::InvalidAmount { .. }));
        }
    }

    #[tokio::test]
    async fn test_bad_upi_id_is_an_encoding_error() {
        let issuer = UpiTokenIssuer::new(PaymentConfig {
            upi_id: "shop upi".into(),
            ..PaymentConfig::default()
        });
        let err = issuer.issue(OrderId(1), 10.0).await.unwrap_err();
        assert!(matches!(err, TokenGenerationError::Encoding(_)));
    }
}
