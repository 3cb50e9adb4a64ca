//! `RecordStore` over the Supabase data API (PostgREST).
//!
//! Filters use PostgREST's `column=eq.value` syntax; writes ask for
//! `return=representation` so callers get the stored row back.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Url};
use serde_json::Value;
use uuid::Uuid;

use super::client::{SupabaseClient, SuccessResponse, content_range_total};
use crate::domain::ports::{RecordStore, Row};
use crate::domain::resources::{RecordFilter, Table};
use crate::domain::{AccessToken, BackendError};

const PREFER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";
const COUNT_EXACT: &str = "count=exact";

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

impl SupabaseClient {
    fn table_url(&self, table: Table) -> Result<Url, BackendError> {
        self.endpoint(&format!("rest/v1/{}", table.name()))
    }

    fn row_url(&self, table: Table, id: Uuid) -> Result<Url, BackendError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("id", &eq(id));
        Ok(url)
    }

    async fn rows(
        &self,
        request: RequestBuilder,
        token: &AccessToken,
    ) -> Result<Vec<Row>, BackendError> {
        let response = self.send(self.authorize(request, Some(token))).await?;
        decode_rows(&response)
    }
}

fn decode_rows(response: &SuccessResponse) -> Result<Vec<Row>, BackendError> {
    let rows: Vec<Value> = response.json("row list")?;
    rows.into_iter()
        .map(|value| match value {
            Value::Object(row) => Ok(row),
            other => Err(BackendError::decode(format!(
                "expected a row object, got {other}"
            ))),
        })
        .collect()
}

#[async_trait]
impl RecordStore for SupabaseClient {
    async fn select(
        &self,
        token: &AccessToken,
        table: Table,
        filters: &[RecordFilter],
    ) -> Result<Vec<Row>, BackendError> {
        let mut url = self.table_url(table)?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("select", "*")
                .append_pair("order", "created_at.desc");
            for filter in filters {
                query.append_pair(&filter.column, &eq(filter.value));
            }
        }
        self.rows(self.http.get(url), token).await
    }

    async fn select_one(
        &self,
        token: &AccessToken,
        table: Table,
        id: Uuid,
    ) -> Result<Option<Row>, BackendError> {
        let mut url = self.row_url(table, id)?;
        url.query_pairs_mut().append_pair("select", "*");
        Ok(self.rows(self.http.get(url), token).await?.into_iter().next())
    }

    async fn insert(
        &self,
        token: &AccessToken,
        table: Table,
        row: Row,
    ) -> Result<Row, BackendError> {
        let request = self
            .http
            .post(self.table_url(table)?)
            .header(PREFER, RETURN_REPRESENTATION)
            .json(&row);
        self.rows(request, token)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::decode(format!("insert into {table} returned no row")))
    }

    async fn update(
        &self,
        token: &AccessToken,
        table: Table,
        id: Uuid,
        changes: Row,
    ) -> Result<Option<Row>, BackendError> {
        let request = self
            .http
            .patch(self.row_url(table, id)?)
            .header(PREFER, RETURN_REPRESENTATION)
            .json(&changes);
        Ok(self.rows(request, token).await?.into_iter().next())
    }

    async fn delete(
        &self,
        token: &AccessToken,
        table: Table,
        id: Uuid,
    ) -> Result<bool, BackendError> {
        let request = self
            .http
            .delete(self.row_url(table, id)?)
            .header(PREFER, RETURN_REPRESENTATION);
        Ok(!self.rows(request, token).await?.is_empty())
    }

    async fn count(&self, token: &AccessToken, table: Table) -> Result<u64, BackendError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("select", "id");
        let request = self.http.head(url).header(PREFER, COUNT_EXACT);
        let response = self.send(self.authorize(request, Some(token))).await?;
        content_range_total(&response.headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BackendErrorKind;
    use reqwest::header::HeaderMap;
    use rstest::rstest;

    fn client() -> SupabaseClient {
        let url = Url::parse("https://abc.supabase.co").expect("url");
        SupabaseClient::new(super::super::SupabaseConfig::new(url, "anon")).expect("client")
    }

    fn response(body: &str) -> SuccessResponse {
        SuccessResponse {
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[rstest]
    fn row_urls_filter_by_id() {
        let id = Uuid::nil();
        let url = client().row_url(Table::WorkLocations, id).expect("url");
        assert_eq!(url.path(), "/rest/v1/work_locations");
        assert_eq!(url.query(), Some(format!("id=eq.{id}").as_str()));
    }

    #[rstest]
    fn decodes_row_arrays() {
        let rows = decode_rows(&response(r#"[{"id":"a"},{"id":"b"}]"#)).expect("rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.first().and_then(|row| row.get("id")), Some(&Value::from("a")));
    }

    #[rstest]
    #[case(r#"{"id":"a"}"#)]
    #[case("[1, 2]")]
    #[case("not json")]
    fn rejects_non_row_payloads(#[case] body: &str) {
        let error = decode_rows(&response(body)).expect_err("must fail");
        assert_eq!(error.kind(), BackendErrorKind::Decode);
    }
}
