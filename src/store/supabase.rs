//! Supabase backend over the PostgREST HTTP interface.

use super::{filter_text, Row, StoreError, Table};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

pub struct SupabaseStore {
    client: Client,
    rest_url: String,
}

impl SupabaseStore {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        let mut apikey = HeaderValue::from_str(api_key).context("SUPABASE_KEY is not a valid header value")?;
        apikey.set_sensitive(true);
        let mut bearer =
            HeaderValue::from_str(&format!("Bearer {api_key}")).context("SUPABASE_KEY is not a valid header value")?;
        bearer.set_sensitive(true);
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to build Supabase HTTP client")?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/{}", self.rest_url, table.as_str())
    }

    fn eq_filter(column: &str, value: &Value) -> String {
        format!("{}=eq.{}", urlencoding::encode(column), urlencoding::encode(&filter_text(value)))
    }

    pub async fn insert(&self, table: Table, row: Row) -> Result<Row, StoreError> {
        let request = self.client.post(self.table_url(table)).json(&row);
        send(request)
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::EmptyInsert(table.as_str()))
    }

    pub async fn select_eq(&self, table: Table, column: &str, value: &Value) -> Result<Vec<Row>, StoreError> {
        let url = format!("{}?select=*&{}", self.table_url(table), Self::eq_filter(column, value));
        send(self.client.get(url)).await
    }

    pub async fn update_eq(
        &self,
        table: Table,
        column: &str,
        value: &Value,
        changes: Row,
    ) -> Result<Vec<Row>, StoreError> {
        let url = format!("{}?{}", self.table_url(table), Self::eq_filter(column, value));
        send(self.client.patch(url).json(&changes)).await
    }

    pub async fn top_by(&self, table: Table, column: &str, limit: usize) -> Result<Vec<Row>, StoreError> {
        let url = format!(
            "{}?select=*&order={}.desc&limit={}",
            self.table_url(table),
            urlencoding::encode(column),
            limit
        );
        send(self.client.get(url)).await
    }
}

async fn send(request: RequestBuilder) -> Result<Vec<Row>, StoreError> {
    let response: Response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(StoreError::Status { status: status.as_u16(), body });
    }
    Ok(response.json::<Vec<Row>>().await?)
}
