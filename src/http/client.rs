//! HTTP client for form-encoded API calls.

use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::status::check_service_error;

/// Authorization attached to a single request.
#[derive(Debug, Clone, Copy)]
pub enum Auth<'a> {
    None,
    /// HTTP Basic, used for the OAuth token exchange
    Basic { username: &'a str, password: &'a str },
    /// OAuth bearer token
    Bearer(&'a str),
}

/// Thin wrapper over a reqwest Client. Requests are sent once; callers get
/// a [`crate::error::ServiceError`] inside the `anyhow::Error` for 4xx
/// statuses.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Performs a form-encoded POST and deserializes the JSON response.
    #[tracing::instrument(skip(self, auth, form))]
    pub async fn post_form_json<T: DeserializeOwned>(
        &self,
        url: &str,
        auth: Auth<'_>,
        form: &[(&str, &str)],
    ) -> Result<T> {
        debug!("POST form to {}...", url);

        let request = self.client.post(url).form(form);
        let request = match auth {
            Auth::None => request,
            Auth::Basic { username, password } => request.basic_auth(username, Some(password)),
            Auth::Bearer(token) => request.bearer_auth(token),
        };

        let response = request.send().await.context("Failed to send request")?;

        let response = response.error_for_status().map_err(check_service_error)?;

        let result = response
            .json::<T>()
            .await
            .context("Failed to parse JSON response")?;

        Ok(result)
    }
}

/// Shows only the ends of a secret, e.g. for debug logs.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*********".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use mockito::Matcher;

    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct TestResponse {
        name: String,
        value: i32,
    }

    #[tokio::test]
    async fn test_post_form_json_success() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/test")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("a".into(), "1".into()),
                Matcher::UrlEncoded("b".into(), "two words".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "test", "value": 42}"#)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result: TestResponse = client
            .post_form_json(
                &format!("{}/test", url),
                Auth::None,
                &[("a", "1"), ("b", "two words")],
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            result,
            TestResponse {
                name: "test".into(),
                value: 42
            }
        );
    }

    #[tokio::test]
    async fn test_post_form_json_basic_auth() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        // base64("id:secret")
        let mock = server
            .mock("POST", "/token")
            .match_header("authorization", "Basic aWQ6c2VjcmV0")
            .with_status(200)
            .with_body(r#"{"name": "ok", "value": 1}"#)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result: TestResponse = client
            .post_form_json(
                &format!("{}/token", url),
                Auth::Basic {
                    username: "id",
                    password: "secret",
                },
                &[],
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.name, "ok");
    }

    #[tokio::test]
    async fn test_post_form_json_bearer_auth() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/submit")
            .match_header("authorization", "Bearer abc123")
            .with_status(200)
            .with_body(r#"{"name": "ok", "value": 2}"#)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result: TestResponse = client
            .post_form_json(&format!("{}/submit", url), Auth::Bearer("abc123"), &[])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.value, 2);
    }

    #[tokio::test]
    async fn test_post_form_json_unauthorized_is_service_error() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/test")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result: Result<serde_json::Value> = client
            .post_form_json(&format!("{}/test", url), Auth::None, &[])
            .await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ServiceError>(),
            Some(ServiceError::AuthenticationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_post_form_json_server_error_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/test")
            .with_status(502)
            .expect(1)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result: Result<serde_json::Value> = client
            .post_form_json(&format!("{}/test", url), Auth::None, &[])
            .await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<ServiceError>().is_none());
    }

    #[tokio::test]
    async fn test_post_form_json_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("POST", "/test")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result: Result<TestResponse> = client
            .post_form_json(&format!("{}/test", url), Auth::None, &[])
            .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON response"));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdefghijklmnop"), "abcd*********mnop");
        assert_eq!(mask_secret("short"), "*********");
    }
}
