//! HTTP client for the warehouse query endpoint.
//!
//! The endpoint accepts a JSON body holding one SQL statement and answers
//! with the result serialised as CSV. One attempt per query; retries and
//! pagination belong to the service, not to this client.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Serialize;

use crate::store::QueryExecutor;
use crate::table::Table;

/// Environment variable consulted for a bearer token.
pub const TOKEN_ENV: &str = "CLIMVIZ_WAREHOUSE_TOKEN";

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

pub struct Warehouse {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl Warehouse {
    pub fn new(endpoint: String, token: Option<String>) -> Self {
        Warehouse {
            client: reqwest::Client::new(),
            endpoint,
            token,
        }
    }

    /// Builds a client, picking up the bearer token from the environment.
    pub fn from_env(endpoint: String) -> Self {
        Self::new(endpoint, std::env::var(TOKEN_ENV).ok())
    }
}

#[async_trait]
impl QueryExecutor for Warehouse {
    async fn execute(&self, query: &str) -> Result<Table> {
        let mut request = self.client.post(&self.endpoint).json(&QueryRequest { query });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("warehouse returned {}", response.status()));
        }

        let body = response.text().await?;
        Ok(Table::from_csv_str(&body)?)
    }
}

// -- Tests -------------------------------------------------------------------
