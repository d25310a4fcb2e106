use crate::Result;
use reqwest::Client;
use reqwest::redirect::Policy;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; sitecheck/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

const MAX_REDIRECTS: usize = 10;

/// Transport-level failure of a single request (timeout, DNS, TLS, refused)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ProbeError(pub String);

/// Issues the requests a liveness check needs and reports the final status
/// code after redirects
pub trait LinkProbe {
    fn head(&self, url: &str) -> impl Future<Output = std::result::Result<u16, ProbeError>> + Send;

    fn get(&self, url: &str) -> impl Future<Output = std::result::Result<u16, ProbeError>> + Send;
}

/// [`LinkProbe`] backed by a shared reqwest client
#[derive(Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> std::result::Result<u16, ProbeError> {
        request
            .send()
            .await
            .map(|response| response.status().as_u16())
            .map_err(|e| ProbeError(e.to_string()))
    }
}

impl LinkProbe for HttpProbe {
    async fn head(&self, url: &str) -> std::result::Result<u16, ProbeError> {
        self.send(self.client.head(url)).await
    }

    async fn get(&self, url: &str) -> std::result::Result<u16, ProbeError> {
        self.send(self.client.get(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `connections` requests, answering HEAD with `head_status` and
    /// everything else with `get_status`
    async fn serve(head_status: u16, get_status: u16, connections: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            for _ in 0..connections {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = vec![0u8; 4096];
                let mut read = 0;
                loop {
                    let n = socket.read(&mut buf[read..]).await.unwrap();
                    read += n;
                    if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let status = if buf.starts_with(b"HEAD") {
                    head_status
                } else {
                    get_status
                };
                let response = format!(
                    "HTTP/1.1 {} Status\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    status
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
        });

        format!("http://{}/page", addr)
    }

    #[tokio::test]
    async fn test_http_probe_reports_status_codes() {
        let url = serve(405, 200, 2).await;
        let probe = HttpProbe::new(DEFAULT_TIMEOUT).unwrap();

        assert_eq!(probe.head(&url).await, Ok(405));
        assert_eq!(probe.get(&url).await, Ok(200));
    }

    #[tokio::test]
    async fn test_http_probe_connection_refused_is_probe_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let probe = HttpProbe::new(Duration::from_secs(2)).unwrap();
        let result = probe.head(&format!("http://{}/", addr)).await;

        assert!(result.is_err());
        assert!(!result.unwrap_err().0.is_empty());
    }
}
