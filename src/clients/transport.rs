use reqwest::{
    Client, StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use secrecy::{ExposeSecret, SecretString};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use crate::error::{GraderError, Result};

/// Status and body of a finished request, whatever the status.
#[derive(Debug, Clone)]
pub struct RemoteResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RemoteResponse {
    /// The body on 2xx, otherwise [`GraderError::RemoteApi`].
    pub fn into_success_body(self) -> Result<String> {
        if self.status.is_success() {
            Ok(self.body)
        } else {
            Err(GraderError::RemoteApi {
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Sends one authenticated form POST and waits for the answer.
pub trait Transport {
    fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<RemoteResponse>;
}

/// reqwest-backed transport. Every request carries
/// `Authorization: Bearer <key>`, marked sensitive so it never shows up in
/// debug output.
///
/// Calls block the current thread on a private single-threaded runtime, so
/// this must not be used from inside another tokio runtime.
pub struct HttpTransport {
    runtime: Runtime,
    client: Client,
}

impl HttpTransport {
    pub fn new(api_key: &SecretString) -> Result<Self> {
        let mut auth_header_value =
            HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret())).map_err(|_| {
                GraderError::Config("API key contains characters not allowed in a header".into())
            })?;
        auth_header_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_header_value);

        let client = Client::builder().default_headers(headers).build()?;
        let runtime = Builder::new_current_thread().enable_all().build()?;

        Ok(Self { runtime, client })
    }

    async fn send_form(&self, url: &str, form: &[(String, String)]) -> Result<RemoteResponse> {
        let response = self.client.post(url).form(form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(RemoteResponse { status, body })
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<RemoteResponse> {
        debug!(url = url, fields = form.len(), "Sending form POST");
        let response = self.runtime.block_on(self.send_form(url, form))?;
        info!(
            url = url,
            status_code = response.status.as_u16(),
            "Canvas request finished"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_becomes_remote_api_error() {
        let response = RemoteResponse {
            status: StatusCode::UNAUTHORIZED,
            body: r#"{"errors":[{"message":"Invalid access token."}]}"#.into(),
        };
        match response.into_success_body() {
            Err(GraderError::RemoteApi { status, body }) => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert!(body.contains("Invalid access token"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn success_keeps_body() {
        let response = RemoteResponse {
            status: StatusCode::CREATED,
            body: "{}".into(),
        };
        assert_eq!(response.into_success_body().unwrap(), "{}");
    }

    #[test]
    fn key_with_newline_is_rejected() {
        let key = SecretString::from("abc\ndef");
        assert!(matches!(
            HttpTransport::new(&key),
            Err(GraderError::Config(_))
        ));
    }
}
