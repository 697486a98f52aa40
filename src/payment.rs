//! Request bodies of the payment endpoints.
//!
//! These are plain serde structs; what gets signed is their JSON text, so field
//! declaration order is the wire order.

use crate::config::{Options, ReturnUrls};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

pub const PAYMENT_METHOD_IDEAL: &str = "iDEAL";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("{0} is a required variable.")]
    MissingArgument(&'static str),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub issuer_id: String,
    pub success_url: String,
    pub cancelled_url: String,
    pub failed_url: String,
    pub expired_url: String,
    pub purchase_id: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
    pub payment_details: PaymentDetails,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,
    pub currency: String,
    pub payments: Vec<Payment>,
}

impl Charge {
    /// A charge settled by a single payment.
    pub fn new(options: &Options, payment: Payment) -> Self {
        Charge {
            amount: payment.amount,
            currency: options.currency.clone(),
            payments: vec![payment],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    /// Copied verbatim from the payment being refunded.
    pub amount: Value,
    pub currency: String,
    pub reason: String,
    pub payment_id: String,
    pub refund_details: Value,
}

// whole amounts go out as `10`, not `10.0`
fn serialize_amount<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if amount.is_finite() && amount.fract() == 0.0 && amount.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

/// Payment details for one purchase.
///
/// Non-empty per-call return URLs win over the configured ones, one by one.
pub fn payment_details(
    options: &Options,
    issuer_id: &str,
    purchase_id: &str,
    description: Option<&str>,
    return_urls: Option<&ReturnUrls>,
) -> Result<PaymentDetails, PaymentError> {
    if issuer_id.is_empty() {
        return Err(PaymentError::MissingArgument("issuerId"));
    }
    if purchase_id.is_empty() {
        return Err(PaymentError::MissingArgument("purchaseId"));
    }

    let configured = &options.return_urls;
    let pick = |choose: fn(&ReturnUrls) -> &String| -> String {
        return_urls
            .map(choose)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| choose(configured))
            .clone()
    };

    Ok(PaymentDetails {
        issuer_id: issuer_id.to_string(),
        success_url: pick(|urls| &urls.success),
        cancelled_url: pick(|urls| &urls.cancel),
        failed_url: pick(|urls| &urls.fail),
        expired_url: pick(|urls| &urls.error),
        purchase_id: purchase_id.to_string(),
        description: description.unwrap_or_default().to_string(),
    })
}

/// An iDEAL payment in the configured currency.
pub fn ideal_payment(
    options: &Options,
    amount: f64,
    issuer_id: &str,
    purchase_id: &str,
    description: Option<&str>,
    return_urls: Option<&ReturnUrls>,
) -> Result<Payment, PaymentError> {
    Ok(Payment {
        amount,
        currency: options.currency.clone(),
        payment_method: PAYMENT_METHOD_IDEAL.to_string(),
        payment_details: payment_details(options, issuer_id, purchase_id, description, return_urls)?,
    })
}
