//! PostgREST client.

use motive_core::{
    Filter, GatewayFuture, StoreApiError, StoreCall, StoreError, StoreGateway, StoreResponse,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;

/// Header asking PostgREST to echo affected rows.
const RETURN_REPRESENTATION: &str = "return=representation";

/// Gateway to a Supabase project's REST endpoint.
#[derive(Clone, Debug)]
pub struct SupabaseGateway {
    client: Client,
    rest_url: String,
    api_key: String,
}

/// Error body PostgREST sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl SupabaseGateway {
    /// Create a gateway for the project at `url`, authenticating with `api_key`.
    #[must_use]
    pub fn new(url: &str, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url, api_key)
    }

    /// Create a gateway reusing an existing HTTP client.
    #[must_use]
    pub fn with_client(client: Client, url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            rest_url: format!("{}/rest/v1", url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }

    /// Base URL every call is made against.
    #[must_use]
    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.rest_url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn build(&self, call: StoreCall) -> RequestBuilder {
        let builder = match call {
            StoreCall::Insert { table, row } => self
                .client
                .post(self.table_url(table))
                .header("Prefer", RETURN_REPRESENTATION)
                .json(&row),
            StoreCall::Update {
                table,
                filter,
                changes,
            } => self
                .client
                .patch(self.table_url(table))
                .query(&[eq(&filter)])
                .header("Prefer", RETURN_REPRESENTATION)
                .json(&changes),
            StoreCall::Delete { table, filter } => self
                .client
                .delete(self.table_url(table))
                .query(&[eq(&filter)])
                .header("Prefer", RETURN_REPRESENTATION),
            StoreCall::Select {
                table,
                columns,
                filter,
            } => self
                .client
                .get(self.table_url(table))
                .query(&[("select".to_string(), columns), eq(&filter)]),
            StoreCall::Rpc { procedure, args } => self
                .client
                .post(format!("{}/rpc/{procedure}", self.rest_url))
                .json(&args),
        };
        self.authorize(builder)
    }

    async fn send(&self, call: StoreCall) -> Result<StoreResponse, StoreError> {
        let operation = call.operation();
        let target = call.target();

        let response = self
            .build(call)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        tracing::debug!(
            operation,
            target,
            status = response.status().as_u16(),
            "Store responded"
        );

        into_store_response(response).await
    }
}

/// `(column, "eq.<value>")` query pair.
fn eq(filter: &Filter) -> (String, String) {
    (filter.column.to_string(), format!("eq.{}", filter.value))
}

async fn into_store_response(response: Response) -> Result<StoreResponse, StoreError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| StoreError::Transport(e.to_string()))?;

    if status.is_success() {
        if body.trim().is_empty() {
            return Ok(StoreResponse::empty());
        }
        let data = serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))?;
        return Ok(StoreResponse::data(data));
    }

    let error = match serde_json::from_str::<PostgrestError>(&body) {
        Ok(PostgrestError {
            message: Some(message),
            code,
            details,
            hint,
        }) => StoreApiError {
            message,
            code,
            details,
            hint,
        },
        _ if body.trim().is_empty() => StoreApiError::new(format!("HTTP {}", status.as_u16())),
        _ => StoreApiError::new(body),
    };
    Ok(StoreResponse::error(error))
}

impl StoreGateway for SupabaseGateway {
    fn execute(&self, call: StoreCall) -> GatewayFuture<'_> {
        Box::pin(self.send(call))
    }

    fn ping(&self) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>> {
        Box::pin(async move {
            let response = self
                .authorize(self.client.get(format!("{}/", self.rest_url)))
                .send()
                .await
                .map_err(|e| StoreError::Transport(e.to_string()))?;

            if response.status().is_server_error() {
                return Err(StoreError::Transport(format!(
                    "store answered HTTP {}",
                    response.status().as_u16()
                )));
            }
            Ok(())
        })
    }
}
