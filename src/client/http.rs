//! Injectable HTTP capability and its reqwest implementation.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::domain::HttpResponse;

pub type BoxError = Box<dyn StdError + Send + Sync>;
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Header name/value pair sent with every request.
pub type Header = (&'static str, String);

/// Performs the HTTP round-trips [`IpPanelChannel`](crate::IpPanelChannel) needs.
///
/// Implementations return `Ok` for every response that was received, whatever its status;
/// `Err` means no response was obtained (DNS, TLS, timeouts, refused connections).
/// Timeouts and pooling belong to the implementation. `headers` are the only headers the
/// request should carry, `Content-Type` included.
pub trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: &'a [Header],
        body: &'a Value,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;

    fn get<'a>(
        &'a self,
        url: &'a str,
        headers: &'a [Header],
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone, Default)]
/// [`HttpTransport`] backed by a shared [`reqwest::Client`].
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: &'a [Header],
        body: &'a Value,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let mut request = self.client.post(url).body(serde_json::to_vec(body)?);
            for (name, value) in headers {
                request = request.header(*name, value.as_str());
            }
            read_response(request.send().await?).await
        })
    }

    fn get<'a>(
        &'a self,
        url: &'a str,
        headers: &'a [Header],
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let mut request = self.client.get(url);
            for (name, value) in headers {
                request = request.header(*name, value.as_str());
            }
            read_response(request.send().await?).await
        })
    }
}

async fn read_response(response: reqwest::Response) -> Result<HttpResponse, BoxError> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok(HttpResponse { status, body })
}
