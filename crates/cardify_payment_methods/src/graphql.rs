//! GraphQL API client for the `createPaymentMethod` mutation.
//!
//! The client sends one POST per call and decodes the response envelope
//! (`data`, `errors`, `error`) into either the mutation payload or a
//! [`PaymentMethodError`]. It never retries.

use async_trait::async_trait;
use cardify_common::create_client;
use cardify_config::GraphqlConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::PaymentMethodError;
use crate::logic::{PaymentMethodResult, UpstreamArgs};

/// Longest slice of an unexpected response body kept in an error.
const MAX_ERROR_BODY_CHARS: usize = 512;

pub const CREATE_PAYMENT_METHOD_MUTATION: &str = r#"
mutation createPaymentMethod(
  $amount: Int
  $monthlyLimitPerMember: Int
  $CollectiveId: Int!
  $PaymentMethodId: Int
  $description: String
  $expiryDate: String
  $type: String!
  $currency: String!
  $limitedToTags: [String]
  $limitedToCollectiveIds: [Int]
  $limitedToHostCollectiveIds: [Int]
) {
  createPaymentMethod(
    amount: $amount
    monthlyLimitPerMember: $monthlyLimitPerMember
    CollectiveId: $CollectiveId
    PaymentMethodId: $PaymentMethodId
    description: $description
    expiryDate: $expiryDate
    type: $type
    currency: $currency
    limitedToTags: $limitedToTags
    limitedToCollectiveIds: $limitedToCollectiveIds
    limitedToHostCollectiveIds: $limitedToHostCollectiveIds
  ) {
    id
    name
    uuid
    collective {
      id
    }
    initialBalance
    monthlyLimitPerMember
    currency
    limitedToTags
    limitedToCollectiveIds
    limitedToHostCollectiveIds
    expiryDate
  }
}
"#;

#[derive(Serialize, Debug)]
struct GraphqlRequest<'a> {
    query: &'static str,
    #[serde(rename = "operationName")]
    operation_name: &'static str,
    variables: &'a UpstreamArgs,
}

/// One entry of a GraphQL `errors` array.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GraphqlErrorMessage {
    #[serde(default)]
    pub message: String,
}

/// Single top-level `error`, either `{ "message": ... }` or a bare string.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum TopLevelError {
    Detailed { message: String },
    Plain(String),
}

impl TopLevelError {
    fn into_message(self) -> String {
        match self {
            TopLevelError::Detailed { message } | TopLevelError::Plain(message) => message,
        }
    }
}

#[derive(Deserialize, Debug)]
struct GraphqlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorMessage>>,
    #[serde(default)]
    error: Option<TopLevelError>,
}

/// `data` of a successful mutation. The payload is absent when the API
/// answered without one.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct CreatePaymentMethodData {
    #[serde(rename = "createPaymentMethod", default)]
    pub create_payment_method: Option<PaymentMethodResult>,
}

/// Decodes a raw API response.
///
/// Failure shapes are checked in a fixed order: a non-empty `errors` array,
/// then a top-level `error`, then a non-success status. A success status with
/// a body that is not a JSON envelope is a parse error.
pub fn classify_response(
    status: u16,
    body: &str,
) -> Result<CreatePaymentMethodData, PaymentMethodError> {
    let success = (200..300).contains(&status);

    let envelope: GraphqlEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if success => return Err(PaymentMethodError::ParseError(e)),
        Err(_) => {
            return Err(PaymentMethodError::UnexpectedResponse {
                status,
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            })
        }
    };

    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        return Err(PaymentMethodError::GraphqlErrors { status, errors });
    }

    if let Some(error) = envelope.error {
        return Err(PaymentMethodError::ApiError {
            status,
            message: error.into_message(),
        });
    }

    if !success {
        return Err(PaymentMethodError::UnexpectedResponse {
            status,
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    match envelope.data {
        None | Some(Value::Null) => Ok(CreatePaymentMethodData::default()),
        Some(data) => Ok(serde_json::from_value(data)?),
    }
}

/// Remote operations on payment methods.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentMethodsApi: Send + Sync {
    /// Runs the `createPaymentMethod` mutation once with the caller's API key.
    async fn create_payment_method(
        &self,
        args: UpstreamArgs,
        api_key: Option<String>,
    ) -> Result<CreatePaymentMethodData, PaymentMethodError>;
}

/// [`PaymentMethodsApi`] backed by the GraphQL HTTP endpoint.
#[derive(Clone, Debug)]
pub struct GraphqlClient {
    http: Client,
    api_url: String,
}

impl GraphqlClient {
    pub fn new(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    /// Builds a client with its own HTTP connection pool and the configured timeout.
    pub fn from_config(config: &GraphqlConfig) -> Result<Self, PaymentMethodError> {
        let http = create_client(config.timeout_secs)?;
        Ok(Self::new(http, config.api_url.clone()))
    }
}

#[async_trait]
impl PaymentMethodsApi for GraphqlClient {
    async fn create_payment_method(
        &self,
        args: UpstreamArgs,
        api_key: Option<String>,
    ) -> Result<CreatePaymentMethodData, PaymentMethodError> {
        let payload = GraphqlRequest {
            query: CREATE_PAYMENT_METHOD_MUTATION,
            operation_name: "createPaymentMethod",
            variables: &args,
        };

        let mut request = self.http.post(&self.api_url).json(&payload);
        if let Some(key) = api_key.as_deref() {
            request = request.query(&[("api_key", key)]);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, "GraphQL API responded to createPaymentMethod");

        classify_response(status, &body)
    }
}
