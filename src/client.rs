use crate::config::{ConfigError, Options};
use crate::credential::Credential;
use crate::error::SignError;
use crate::payment::{Charge, Payment, PaymentError, Refund};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const PATH_IDEAL_ISSUERS: &str = "/issuers/v1/ideal";
pub const PATH_CHARGES: &str = "/charges/v1";
pub const PATH_PAYMENTS: &str = "/payments/v1";
pub const PATH_REFUNDS: &str = "/refunds/v1";

const CONTENT_TYPE_JSON: &str = "application/json";

/// Result type for gateway calls
pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Sign(#[from] SignError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    MissingArgument(#[from] PaymentError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The gateway answered with an `errors` array.
    #[error("Gateway error: {0}")]
    Api(String),
}

/// CM Payments gateway client.
///
/// Every request is signed right before it is sent, so a client can be shared
/// between tasks.
#[derive(Clone, Debug)]
pub struct CmPayClient {
    options: Options,
    credential: Credential,
    http: reqwest::Client,
}

impl CmPayClient {
    pub fn new(options: Options) -> ClientResult<Self> {
        options.validate()?;
        let http = reqwest::Client::builder()
            .connection_verbose(options.debug)
            .build()?;
        Ok(CmPayClient {
            credential: options.credential(),
            options,
            http,
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Build a signed request for `path` without sending it.
    pub fn build_request(
        &self,
        path: &str,
        body: Option<&Value>,
        method: Method,
    ) -> ClientResult<reqwest::Request> {
        let body = body.filter(|b| !b.is_null());
        let full_url = format!("{}{}", self.options.api_url, path);
        let authorization = self.credential.authorize(method.as_str(), &full_url, body)?;

        let mut builder = self
            .http
            .request(method, full_url.as_str())
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(AUTHORIZATION, authorization);
        if let Some(body) = body {
            // send exactly the text that was signed
            builder = builder.body(body.to_string());
        }
        Ok(builder.build()?)
    }

    /// Sign and send a request, returning the JSON response.
    pub async fn send_request(&self, path: &str, body: Option<&Value>, method: Method) -> ClientResult<Value> {
        let request = self.build_request(path, body, method)?;
        debug!(method = %request.method(), url = %request.url(), "Sending request");

        let response = self.http.execute(request).await?;
        debug!(status = %response.status(), "Received response");
        let text = response.text().await?;
        let json: Value = serde_json::from_str(&text)?;
        if let Some(message) = api_error(&json) {
            return Err(ClientError::Api(message));
        }
        Ok(json)
    }

    /// iDEAL issuers (banks).
    pub async fn bank_list(&self) -> ClientResult<Value> {
        self.send_request(PATH_IDEAL_ISSUERS, None, Method::GET).await
    }

    pub async fn create_charge(&self, payment: Payment) -> ClientResult<Value> {
        let charge = serde_json::to_value(Charge::new(&self.options, payment))?;
        self.send_request(PATH_CHARGES, Some(&charge), Method::POST).await
    }

    pub async fn charge(&self, charge_id: &str) -> ClientResult<Value> {
        if charge_id.is_empty() {
            return Err(PaymentError::MissingArgument("chargeId").into());
        }
        self.send_request(&format!("{}/{}", PATH_CHARGES, charge_id), None, Method::GET)
            .await
    }

    pub async fn payment(&self, payment_id: &str) -> ClientResult<Value> {
        if payment_id.is_empty() {
            return Err(PaymentError::MissingArgument("paymentId").into());
        }
        self.send_request(&format!("{}/{}", PATH_PAYMENTS, payment_id), None, Method::GET)
            .await
    }

    /// Refund a payment in full; the amount is taken from the payment itself.
    pub async fn refund_payment(
        &self,
        payment_id: &str,
        reason: &str,
        refund_details: Option<Value>,
    ) -> ClientResult<Value> {
        if payment_id.is_empty() {
            return Err(PaymentError::MissingArgument("paymentId").into());
        }
        if reason.is_empty() {
            return Err(PaymentError::MissingArgument("reason").into());
        }

        let payment = self.payment(payment_id).await?;
        let refund = Refund {
            amount: payment.get("amount").cloned().unwrap_or(Value::Null),
            currency: self.options.currency.clone(),
            reason: reason.to_string(),
            payment_id: payment_id.to_string(),
            refund_details: refund_details.unwrap_or_else(|| Value::Object(Default::default())),
        };
        let refund = serde_json::to_value(refund)?;
        self.send_request(PATH_REFUNDS, Some(&refund), Method::POST).await
    }
}

/// First message of an `errors` array, if the response carries one.
fn api_error(response: &Value) -> Option<String> {
    let errors = response.get("errors")?;
    let message = errors
        .get(0)
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    Some(message.to_string())
}
