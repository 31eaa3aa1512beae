//! Presto coordinator JMX 메트릭 수집 모듈
//!
//! Bean Catalog의 각 bean을 coordinator에서 조회하고, whitelist에 있는
//! 숫자 속성만 gauge로 내보냅니다. 한 bean의 실패는 로그만 남기고
//! 나머지 bean 처리를 막지 않습니다.
//!
//! # Example
//!
//! ```ignore
//! use presto_metrico::collector::Collector;
//! use presto_metrico::statsd::StatsdClient;
//!
//! let collector = Collector::presto("http://presto:8080", 5000)?;
//! let statsd = StatsdClient::connect("127.0.0.1:8125")?;
//! let report = collector.run_pass(&statsd).await;
//! ```

mod client;
mod parser;
mod uri;

pub use client::CoordinatorClient;
pub use parser::{
    parse_bean, parse_bean_slice, Attribute, AttributeValue, CollectResult, FetchedMetric,
};
pub use uri::build_uri;

use std::time::Instant;

use futures::future::join_all;
use tracing::{debug, error, info, instrument, warn};

use crate::catalog::{BeanCatalog, MetricWhitelist};
use crate::metrics::PassReport;
use crate::statsd::GaugeSink;
use crate::transformer::{coerce, emit};

/// Collector 구조체 - 한 번의 collection pass를 수행
pub struct Collector {
    client: CoordinatorClient,
    catalog: BeanCatalog,
    whitelist: MetricWhitelist,
}

impl Collector {
    /// 새 Collector 생성
    pub fn new(client: CoordinatorClient, catalog: BeanCatalog, whitelist: MetricWhitelist) -> Self {
        Self {
            client,
            catalog,
            whitelist,
        }
    }

    /// 기본 Presto catalog/whitelist로 Collector 생성
    pub fn presto(base_url: &str, timeout_ms: u64) -> CollectResult<Self> {
        let client = CoordinatorClient::new(base_url, timeout_ms)?;
        Ok(Self::new(
            client,
            BeanCatalog::presto(),
            MetricWhitelist::presto(),
        ))
    }

    /// 논리 그룹 하나를 조회
    pub async fn fetch_group(&self, group: &str) -> CollectResult<FetchedMetric> {
        let uri = self.catalog.uri_for(self.client.base_url(), group)?;
        self.client.fetch_bean(&uri).await
    }

    /// Collection pass 한 번 실행
    ///
    /// 모든 bean을 동시에 조회한 뒤 catalog 순서대로 처리합니다.
    /// bean 단위 에러는 로그로만 남고 반환되지 않습니다.
    #[instrument(skip(self, sink), fields(beans = self.catalog.len()))]
    pub async fn run_pass(&self, sink: &dyn GaugeSink) -> PassReport {
        let start = Instant::now();
        let mut report = PassReport {
            beans: self.catalog.len(),
            ..PassReport::default()
        };

        let groups: Vec<&str> = self.catalog.groups().collect();
        let results = join_all(groups.iter().map(|group| self.fetch_group(group))).await;

        for (group, result) in groups.into_iter().zip(results) {
            match result {
                Ok(bean) => self.forward_bean(sink, group, &bean, &mut report),
                Err(e) => {
                    report.beans_failed += 1;
                    error!(group = %group, error = %e, "Failed to collect bean");
                }
            }
        }

        report.duration = start.elapsed();
        info!(
            beans_ok = report.beans_succeeded(),
            beans_failed = report.beans_failed,
            gauges = report.gauges_emitted,
            skipped = report.attributes_skipped,
            duration_ms = report.duration.as_millis() as u64,
            "Collection pass complete"
        );

        report
    }

    fn forward_bean(
        &self,
        sink: &dyn GaugeSink,
        group: &str,
        bean: &FetchedMetric,
        report: &mut PassReport,
    ) {
        debug!(
            group = %group,
            class_name = %bean.class_name,
            attributes = bean.attributes.len(),
            "Bean collected"
        );

        for attribute in &bean.attributes {
            if !self.whitelist.should_forward(&attribute.name) {
                report.attributes_ignored += 1;
                continue;
            }

            if let Some(owner) = self.whitelist.owner(&attribute.name) {
                if owner != group {
                    debug!(
                        group = %group,
                        owner = %owner,
                        attribute = %attribute.name,
                        "Whitelisted attribute fetched from another group"
                    );
                }
            }

            match coerce(&attribute.value) {
                Ok(value) => {
                    emit(sink, group, &attribute.name, value);
                    report.gauges_emitted += 1;
                }
                Err(skip) => {
                    report.attributes_skipped += 1;
                    warn!(
                        group = %group,
                        attribute = %attribute.name,
                        value = ?attribute.value,
                        reason = %skip,
                        "Skipping attribute"
                    );
                }
            }
        }
    }

    /// 클라이언트 참조 반환
    pub fn client(&self) -> &CoordinatorClient {
        &self.client
    }

    pub fn catalog(&self) -> &BeanCatalog {
        &self.catalog
    }

    pub fn whitelist(&self) -> &MetricWhitelist {
        &self.whitelist
    }
}
