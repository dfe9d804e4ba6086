//! HTTP client abstraction for making requests to the ZenMotion API

use log::debug;
use reqwest::{Client, Method, RequestBuilder, header::{HeaderMap, HeaderValue}};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::error::{Error, Result};

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            query_params: Vec::new(),
            body: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add a query parameter to the request
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    /// Build the request
    fn build(&self) -> Result<RequestBuilder> {
        let mut url = Url::parse(&self.url)?;

        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        debug!("{} {}", self.method, url);

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Send the request and fail on non-success statuses
    async fn send(&self) -> Result<reqwest::Response> {
        let req = self.build()?;
        let response = req.send().await?;
        let status = response.status();
        debug!("{} {} -> {}", self.method, self.url, status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &text));
        }

        Ok(response)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T> {
        let response = self.send().await?;
        let bytes = response.bytes().await?;
        let result = serde_json::from_slice::<T>(&bytes)?;
        Ok(result)
    }

    /// Execute the request and discard any response body
    pub async fn execute_empty(&self) -> Result<()> {
        self.send().await?;
        Ok(())
    }
}

/// Build an [`Error::Api`] from a failed response body.
///
/// The backend reports errors as `{"detail": ..}`, `{"message": ..}` or
/// `{"error": ..}`; validation failures come back as a field -> messages map.
pub(crate) fn api_error(status: u16, body: &str) -> Error {
    let message = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => ["detail", "message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()).map(str::to_string))
            .unwrap_or_else(|| {
                map.iter()
                    .map(|(field, msgs)| format!("{}: {}", field, flatten_messages(msgs)))
                    .collect::<Vec<_>>()
                    .join("; ")
            }),
        _ => body.trim().to_string(),
    };

    if message.is_empty() {
        return Error::Api {
            status,
            message: format!("request failed with status {}", status),
        };
    }
    Error::Api { status, message }
}

fn flatten_messages(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(flatten_messages)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }

    /// Create a PATCH request
    pub fn patch<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::PATCH)
    }

    /// Create a DELETE request
    pub fn delete<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::DELETE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_prefers_detail() {
        let err = api_error(404, r#"{"detail": "Not found."}"#);
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not found.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn api_error_flattens_field_errors() {
        let err = api_error(400, r#"{"email": ["This field must be unique."]}"#);
        match err {
            Error::Api { message, .. } => assert_eq!(message, "email: This field must be unique."),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn api_error_falls_back_to_text() {
        match api_error(500, "Internal Server Error") {
            Error::Api { message, .. } => assert_eq!(message, "Internal Server Error"),
            other => panic!("unexpected error: {:?}", other),
        }
        match api_error(502, "  ") {
            Error::Api { message, .. } => assert_eq!(message, "request failed with status 502"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
