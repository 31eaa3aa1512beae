//! Coordinator HTTP 클라이언트
//!
//! Connection pooling과 요청별 타임아웃을 지원하는 비동기 HTTP 클라이언트입니다.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, instrument};

use super::parser::{parse_bean_slice, CollectResult, FetchedMetric};
use crate::error::CollectorError;

/// Presto coordinator JMX HTTP 클라이언트
#[derive(Clone)]
pub struct CoordinatorClient {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl CoordinatorClient {
    /// 새 클라이언트 생성
    ///
    /// # Arguments
    /// * `base_url` - Coordinator 주소 (예: "http://presto:8080")
    /// * `timeout_ms` - bean 한 건당 요청 타임아웃 (밀리초)
    ///
    /// # Example
    /// ```ignore
    /// let client = CoordinatorClient::new("http://presto:8080", 5000)?;
    /// ```
    pub fn new(base_url: &str, timeout_ms: u64) -> CollectResult<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(CollectorError::HttpClientInit)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms,
        })
    }

    /// 끝의 '/'를 제거한 coordinator 주소
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 요청 타임아웃 (밀리초)
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// 단일 bean 조회
    ///
    /// 재시도나 인증 없이 GET 한 번만 수행합니다. 응답 본문은 반환 전에
    /// 모두 읽고 해제합니다.
    #[instrument(skip(self), fields(uri = %uri))]
    pub async fn fetch_bean(&self, uri: &str) -> CollectResult<FetchedMetric> {
        debug!("Sending coordinator bean request");

        let response = self
            .client
            .get(uri)
            .send()
            .await
            .map_err(|e| CollectorError::from_reqwest(e, self.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectorError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CollectorError::from_reqwest(e, self.timeout_ms))?;

        parse_bean_slice(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new() {
        let client = CoordinatorClient::new("http://localhost:8080", 5000);
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = CoordinatorClient::new("http://localhost:8080/", 5000).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.timeout_ms(), 5000);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // port 9 (discard) on loopback is almost never listening
        let client = CoordinatorClient::new("http://127.0.0.1:9", 1000).unwrap();
        let result = client
            .fetch_bean("http://127.0.0.1:9/v1/jmx/mbean/a:name=B")
            .await;
        assert!(result.is_err_and(|e| e.is_transport()));
    }
}
