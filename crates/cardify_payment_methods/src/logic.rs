// --- File: crates/cardify_payment_methods/src/logic.rs ---

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::PaymentMethodError;
use crate::graphql::PaymentMethodsApi;

// Conditionally import ToSchema if openapi feature is enabled
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// The only payment method type this service creates.
pub const VIRTUALCARD: &str = "virtualcard";

/// Number of uuid characters that make up a redeem code.
pub const REDEEM_CODE_LEN: usize = 8;

// --- Data Structures ---

/// Body of a payment method creation request.
///
/// Only the listed fields are read; anything else in the body is dropped.
/// Values are kept as sent and checked by the GraphQL API, except `type`.
#[derive(Deserialize, Debug, Default, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreationRequest {
    #[serde(rename = "type")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "virtualcard"))]
    pub payment_method_type: Option<Value>,
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = Option<String>, example = "Gift card for our contributors")
    )]
    pub description: Option<Value>,
    #[serde(rename = "CollectiveId", alias = "collectiveId")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>, example = 8686))]
    pub collective_id: Option<Value>,
    #[serde(rename = "PaymentMethodId", alias = "paymentMethodId")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub payment_method_id: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>, example = 5000))]
    pub amount: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>))]
    pub monthly_limit_per_member: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "USD"))]
    pub currency: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "2026-12-31"))]
    pub expiry_date: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Vec<String>>))]
    pub limited_to_tags: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Vec<i64>>))]
    pub limited_to_collective_ids: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Vec<i64>>))]
    pub limited_to_host_collective_ids: Option<Value>,
}

impl CreationRequest {
    /// Picks the known fields out of a decoded JSON body.
    ///
    /// Any JSON object is accepted whatever its field values are; other
    /// bodies are rejected.
    pub fn from_body(body: Value) -> Result<Self, PaymentMethodError> {
        if !body.is_object() {
            return Err(PaymentMethodError::InvalidBody(format!(
                "expected a JSON object, got {}",
                json_kind(&body)
            )));
        }
        serde_json::from_value(body).map_err(|e| PaymentMethodError::InvalidBody(e.to_string()))
    }
}

/// Variables sent with the `createPaymentMethod` mutation.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamArgs {
    #[serde(rename = "type")]
    pub payment_method_type: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(rename = "CollectiveId", skip_serializing_if = "Option::is_none")]
    pub collective_id: Option<Value>,
    #[serde(rename = "PaymentMethodId", skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_limit_per_member: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limited_to_tags: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limited_to_collective_ids: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limited_to_host_collective_ids: Option<Value>,
}

impl From<CreationRequest> for UpstreamArgs {
    fn from(request: CreationRequest) -> Self {
        Self {
            payment_method_type: requested_type(&request)
                .cloned()
                .unwrap_or_else(|| Value::from(VIRTUALCARD)),
            description: request.description,
            collective_id: request.collective_id,
            payment_method_id: request.payment_method_id,
            amount: request.amount,
            monthly_limit_per_member: request.monthly_limit_per_member,
            currency: request.currency,
            expiry_date: request.expiry_date,
            limited_to_tags: request.limited_to_tags,
            limited_to_collective_ids: request.limited_to_collective_ids,
            limited_to_host_collective_ids: request.limited_to_host_collective_ids,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CollectiveRef {
    pub id: i64,
}

/// Payment method as returned by the mutation.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodResult {
    pub id: i64,
    pub name: Option<String>,
    pub collective: Option<CollectiveRef>,
    pub initial_balance: Option<i64>,
    pub monthly_limit_per_member: Option<i64>,
    pub currency: Option<String>,
    pub limited_to_tags: Option<Vec<String>>,
    pub limited_to_collective_ids: Option<Vec<i64>>,
    pub limited_to_host_collective_ids: Option<Vec<i64>>,
    pub uuid: String,
    // String or epoch milliseconds depending on the API version
    pub expiry_date: Option<Value>,
}

/// Response returned to the client after a payment method was created.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodResponse {
    #[cfg_attr(feature = "openapi", schema(example = 42))]
    pub id: i64,
    pub name: Option<String>,
    #[serde(rename = "CollectiveId")]
    pub collective_id: Option<i64>,
    #[cfg_attr(feature = "openapi", schema(example = 5000))]
    pub balance: Option<i64>,
    pub monthly_limit_per_member: Option<i64>,
    pub currency: Option<String>,
    pub limited_to_tags: Option<Vec<String>>,
    pub limited_to_collective_ids: Option<Vec<i64>>,
    pub limited_to_host_collective_ids: Option<Vec<i64>>,
    #[cfg_attr(feature = "openapi", schema(example = "abcdef12"))]
    pub code: String,
    #[cfg_attr(feature = "openapi", schema(example = "2026-12-31T00:00:00+00:00"))]
    pub expiry_date: Option<String>,
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://example.com/redeem?code=abcdef12")
    )]
    pub redeem_url: String,
}

impl PaymentMethodResponse {
    /// Reshapes a created payment method for the client.
    ///
    /// # Arguments
    /// * `result` - Payment method returned by the API.
    /// * `website_url` - Base URL of the public site hosting the redeem page.
    pub fn from_result(result: PaymentMethodResult, website_url: &str) -> Self {
        let code = redeem_code(&result.uuid).to_string();
        let expiry_date = result.expiry_date.as_ref().and_then(|raw| {
            let formatted = canonical_expiry_date(raw);
            if formatted.is_none() {
                warn!(expiry_date = %raw, "Unrecognised expiry date from GraphQL API");
            }
            formatted
        });

        Self {
            id: result.id,
            name: result.name,
            collective_id: result.collective.map(|c| c.id),
            balance: result.initial_balance,
            monthly_limit_per_member: result.monthly_limit_per_member,
            currency: result.currency,
            limited_to_tags: result.limited_to_tags,
            limited_to_collective_ids: result.limited_to_collective_ids,
            limited_to_host_collective_ids: result.limited_to_host_collective_ids,
            redeem_url: redeem_url(website_url, &code),
            code,
            expiry_date,
        }
    }
}

// --- Core Logic Functions ---

/// The requested type, if one was given. `null`, `false`, `0` and `""` count
/// as not given.
fn requested_type(request: &CreationRequest) -> Option<&Value> {
    request.payment_method_type.as_ref().filter(|t| is_truthy(t))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Rejects any payment method type other than virtualcard.
///
/// Strings appear as is in the message, other values as JSON text.
pub fn validate_type(request: &CreationRequest) -> Result<(), PaymentMethodError> {
    match requested_type(request) {
        None => Ok(()),
        Some(Value::String(t)) if t == VIRTUALCARD => Ok(()),
        Some(Value::String(t)) => Err(PaymentMethodError::UnsupportedType(t.clone())),
        Some(other) => Err(PaymentMethodError::UnsupportedType(other.to_string())),
    }
}

/// First characters of the payment method uuid, used as the redeem code.
pub fn redeem_code(uuid: &str) -> &str {
    match uuid.char_indices().nth(REDEEM_CODE_LEN) {
        Some((end, _)) => &uuid[..end],
        None => uuid,
    }
}

/// Link to the redeem page of the public site.
pub fn redeem_url(website_url: &str, code: &str) -> String {
    format!("{}/redeem?code={}", website_url.trim_end_matches('/'), code)
}

/// Normalises a raw expiry date to RFC 3339 in UTC with second precision.
///
/// Accepts RFC 3339 strings with any offset, naive date-times
/// (`2026-12-31 23:59:59`, `2026-12-31T23:59:59.000`) and plain dates, all
/// read as UTC, and epoch milliseconds. Returns `None` for `null` or anything
/// unrecognised.
pub fn canonical_expiry_date(raw: &Value) -> Option<String> {
    let parsed: DateTime<Utc> = match raw {
        Value::String(s) => parse_date_string(s.trim())?,
        Value::Number(n) => Utc.timestamp_millis_opt(n.as_i64()?).single()?,
        _ => return None,
    };
    Some(parsed.to_rfc3339_opts(SecondsFormat::Secs, false))
}

fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// Creates a virtualcard payment method through the GraphQL API.
///
/// Validates the requested type, projects the request onto the mutation
/// variables, runs the mutation once and reshapes the result. Every failure
/// is logged here before it is returned.
///
/// # Arguments
/// * `api` - Client for the GraphQL API.
/// * `website_url` - Base URL used to build the redeem link.
/// * `request` - Decoded request body.
/// * `api_key` - API key of the caller, forwarded as is.
pub async fn create_payment_method(
    api: &dyn PaymentMethodsApi,
    website_url: &str,
    request: CreationRequest,
    api_key: Option<String>,
) -> Result<PaymentMethodResponse, PaymentMethodError> {
    if let Err(e) = validate_type(&request) {
        warn!("Rejected payment method creation: {}", e);
        return Err(e);
    }

    let args = UpstreamArgs::from(request);
    debug!(?args, "Creating payment method");

    let result = match api.create_payment_method(args, api_key).await {
        Ok(response) => {
            debug!(?response, "createPaymentMethod response");
            response
                .create_payment_method
                .ok_or(PaymentMethodError::MissingPaymentMethod)
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(payment_method) => Ok(PaymentMethodResponse::from_result(payment_method, website_url)),
        Err(e) => {
            if let PaymentMethodError::GraphqlErrors { errors, .. } = &e {
                for (index, item) in errors.iter().enumerate() {
                    warn!(index, message = %item.message, "GraphQL error");
                }
            }
            error!(error = %e, "Payment method creation failed");
            Err(e)
        }
    }
}
