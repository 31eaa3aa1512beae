//! Static Bean Catalog and Metric Whitelist
//!
//! The catalog maps a short logical group name to the JMX object name the
//! coordinator exposes it under. The whitelist maps an attribute name to the
//! group it belongs to; only whitelisted attributes are forwarded.

use std::collections::HashMap;

use tracing::warn;

use crate::collector::build_uri;
use crate::error::CollectorError;

/// Path under the coordinator base address where beans are served
pub const JMX_PATH_SUFFIX: &str = "/v1/jmx/mbean/";

/// Default Presto beans, as (logical group, JMX object name)
pub const PRESTO_BEANS: &[(&str, &str)] = &[
    ("queryManager", "com.facebook.presto.execution:name=QueryManager"),
    ("taskExecutor", "com.facebook.presto.execution:name=TaskExecutor"),
    ("taskManager", "com.facebook.presto.execution:name=TaskManager"),
    (
        "memoryPoolGeneral",
        "com.facebook.presto.memory:type=MemoryPool,name=general",
    ),
    (
        "clusterMemoryManager",
        "com.facebook.presto.memory:name=ClusterMemoryManager",
    ),
];

/// Default forwarded attributes, as (attribute name, owning group)
pub const PRESTO_WHITELIST: &[(&str, &str)] = &[
    ("Executor.ActiveCount", "queryManager"),
    ("Executor.QueuedTaskCount", "queryManager"),
    ("Executor.TaskCount", "queryManager"),
    ("Executor.CompletedTaskCount", "queryManager"),
    ("Executor.CorePoolSize", "queryManager"),
    ("Executor.PoolSize", "queryManager"),
    ("ManagementExecutor.ActiveCount", "queryManager"),
    ("ManagementExecutor.CompletedTaskCount", "queryManager"),
    ("ManagementExecutor.QueuedTaskCount", "queryManager"),
    ("AbandonedQueries.FifteenMinute.Count", "queryManager"),
    ("AbandonedQueries.FifteenMinute.Rate", "queryManager"),
    ("AbandonedQueries.FiveMinute.Count", "queryManager"),
    ("AbandonedQueries.FiveMinute.Rate", "queryManager"),
    ("AbandonedQueries.OneMinute.Count", "queryManager"),
    ("AbandonedQueries.OneMinute.Rate", "queryManager"),
    ("AbandonedQueries.TotalCount", "queryManager"),
    ("CanceledQueries.FifteenMinute.Count", "queryManager"),
    ("CanceledQueries.FifteenMinute.Rate", "queryManager"),
    ("CanceledQueries.FiveMinute.Count", "queryManager"),
    ("CanceledQueries.FiveMinute.Rate", "queryManager"),
    ("CanceledQueries.OneMinute.Count", "queryManager"),
    ("CanceledQueries.OneMinute.Rate", "queryManager"),
    ("CanceledQueries.TotalCount", "queryManager"),
    ("CompletedQueries.FifteenMinute.Count", "queryManager"),
    ("CompletedQueries.FifteenMinute.Rate", "queryManager"),
    ("CompletedQueries.FiveMinute.Count", "queryManager"),
    ("CompletedQueries.FiveMinute.Rate", "queryManager"),
    ("CompletedQueries.OneMinute.Count", "queryManager"),
    ("CompletedQueries.OneMinute.Rate", "queryManager"),
    ("CompletedQueries.TotalCount", "queryManager"),
    ("CpuInputByteRate.AllTime.P95", "queryManager"),
    ("CpuInputByteRate.FifteenMinutes.P95", "queryManager"),
    ("CpuInputByteRate.FiveMinutes.P95", "queryManager"),
    ("CpuInputByteRate.OneMinute.P95", "queryManager"),
    ("ExecutionTime.AllTime.P95", "queryManager"),
    ("ExecutionTime.FifteenMinutes.P95", "queryManager"),
    ("ExecutionTime.FiveMinutes.P95", "queryManager"),
    ("ExecutionTime.OneMinute.P95", "queryManager"),
    ("FailedQueries.FifteenMinute.Count", "queryManager"),
    ("FailedQueries.FifteenMinute.Rate", "queryManager"),
    ("FailedQueries.FiveMinute.Count", "queryManager"),
    ("FailedQueries.FiveMinute.Rate", "queryManager"),
    ("FailedQueries.OneMinute.Count", "queryManager"),
    ("FailedQueries.OneMinute.Rate", "queryManager"),
    ("FailedQueries.TotalCount", "queryManager"),
    ("InsufficientResourcesFailures.FifteenMinute.Count", "queryManager"),
    ("InsufficientResourcesFailures.FifteenMinute.Rate", "queryManager"),
    ("InsufficientResourcesFailures.FiveMinute.Count", "queryManager"),
    ("InsufficientResourcesFailures.FiveMinute.Rate", "queryManager"),
    ("InsufficientResourcesFailures.OneMinute.Count", "queryManager"),
    ("InsufficientResourcesFailures.OneMinute.Rate", "queryManager"),
    ("InsufficientResourcesFailures.TotalCount", "queryManager"),
    ("InternalFailures.FifteenMinute.Count", "queryManager"),
    ("InternalFailures.FifteenMinute.Rate", "queryManager"),
    ("InternalFailures.FiveMinute.Count", "queryManager"),
    ("InternalFailures.FiveMinute.Rate", "queryManager"),
    ("InternalFailures.OneMinute.Count", "queryManager"),
    ("InternalFailures.OneMinute.Rate", "queryManager"),
    ("InternalFailures.TotalCount", "queryManager"),
    ("RunningQueries", "queryManager"),
    ("StartedQueries.FifteenMinute.Count", "queryManager"),
    ("StartedQueries.FifteenMinute.Rate", "queryManager"),
    ("StartedQueries.FiveMinute.Count", "queryManager"),
    ("StartedQueries.FiveMinute.Rate", "queryManager"),
    ("StartedQueries.OneMinute.Count", "queryManager"),
    ("StartedQueries.OneMinute.Rate", "queryManager"),
    ("StartedQueries.TotalCount", "queryManager"),
    ("UserErrorFailures.FifteenMinute.Count", "queryManager"),
    ("UserErrorFailures.FifteenMinute.Rate", "queryManager"),
    ("UserErrorFailures.FiveMinute.Count", "queryManager"),
    ("UserErrorFailures.FiveMinute.Rate", "queryManager"),
    ("UserErrorFailures.OneMinute.Count", "queryManager"),
    ("UserErrorFailures.OneMinute.Rate", "queryManager"),
    ("UserErrorFailures.TotalCount", "queryManager"),
    ("ProcessorExecutor.QueuedTaskCount", "taskExecutor"),
    ("BlockedSplits", "taskExecutor"),
    ("PendingSplits", "taskExecutor"),
    ("RunningSplits", "taskExecutor"),
    ("QueuedTime.FifteenMinutes.P95", "taskExecutor"),
    ("QueuedTime.FiveMinutes.P95", "taskExecutor"),
    ("QueuedTime.OneMinute.P95", "taskExecutor"),
    ("InputDataSize.FifteenMinute.Count", "taskManager"),
    ("InputDataSize.FifteenMinute.Rate", "taskManager"),
    ("InputDataSize.FiveMinute.Count", "taskManager"),
    ("InputDataSize.FiveMinute.Rate", "taskManager"),
    ("InputDataSize.OneMinute.Count", "taskManager"),
    ("InputDataSize.OneMinute.Rate", "taskManager"),
    ("InputPositions.FifteenMinute.Count", "taskManager"),
    ("InputPositions.FifteenMinute.Rate", "taskManager"),
    ("InputPositions.FiveMinute.Count", "taskManager"),
    ("InputPositions.FiveMinute.Rate", "taskManager"),
    ("InputPositions.OneMinute.Count", "taskManager"),
    ("InputPositions.OneMinute.Rate", "taskManager"),
    ("OutputDataSize.FifteenMinute.Count", "taskManager"),
    ("OutputDataSize.FifteenMinute.Rate", "taskManager"),
    ("OutputDataSize.FiveMinute.Count", "taskManager"),
    ("OutputDataSize.FiveMinute.Rate", "taskManager"),
    ("OutputDataSize.OneMinute.Count", "taskManager"),
    ("OutputDataSize.OneMinute.Rate", "taskManager"),
    ("OutputPositions.FifteenMinute.Count", "taskManager"),
    ("OutputPositions.FifteenMinute.Rate", "taskManager"),
    ("OutputPositions.FiveMinute.Count", "taskManager"),
    ("OutputPositions.FiveMinute.Rate", "taskManager"),
    ("OutputPositions.OneMinute.Count", "taskManager"),
    ("OutputPositions.OneMinute.Rate", "taskManager"),
    ("TaskManagementExecutor.PoolSize", "taskManager"),
    ("TaskManagementExecutor.QueuedTaskCount", "taskManager"),
    ("TaskManagementExecutor.TaskCount", "taskManager"),
    ("TaskNotificationExecutor.ActiveCount", "taskManager"),
    ("TaskNotificationExecutor.PoolSize", "taskManager"),
    ("TaskNotificationExecutor.QueuedTaskCount", "taskManager"),
    ("FreeBytes", "memoryPoolGeneral"),
    ("MaxBytes", "memoryPoolGeneral"),
    ("ClusterMemoryBytes", "clusterMemoryManager"),
    ("ClusterMemoryUsageBytes", "clusterMemoryManager"),
];

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanEntry {
    /// Logical group name, e.g. `queryManager`
    pub group: String,
    /// Fully-qualified JMX object name
    pub object_name: String,
}

/// Ordered set of beans collected on every pass
#[derive(Debug, Clone, Default)]
pub struct BeanCatalog {
    entries: Vec<BeanEntry>,
}

impl BeanCatalog {
    /// Build a catalog from (group, object name) pairs
    ///
    /// Group names are unique; a repeated group keeps its first object name.
    pub fn from_pairs<G, O, I>(pairs: I) -> Self
    where
        G: Into<String>,
        O: Into<String>,
        I: IntoIterator<Item = (G, O)>,
    {
        let mut entries: Vec<BeanEntry> = Vec::new();
        for (group, object_name) in pairs {
            let group = group.into();
            if entries.iter().any(|e| e.group == group) {
                warn!(group = %group, "Duplicate bean group ignored");
                continue;
            }
            entries.push(BeanEntry {
                group,
                object_name: object_name.into(),
            });
        }
        Self { entries }
    }

    /// The built-in Presto coordinator catalog
    pub fn presto() -> Self {
        Self::from_pairs(PRESTO_BEANS.iter().copied())
    }

    /// Look up the JMX object name for a group
    pub fn object_name(&self, group: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.group == group)
            .map(|e| e.object_name.as_str())
    }

    /// Build the fetch URI for a logical group
    ///
    /// # Errors
    /// Returns `CollectorError::UnknownMetricGroup` when the group is not in the catalog
    pub fn uri_for(&self, base_url: &str, group: &str) -> Result<String, CollectorError> {
        let object_name = self
            .object_name(group)
            .ok_or_else(|| CollectorError::UnknownMetricGroup(group.to_string()))?;
        Ok(build_uri(base_url, JMX_PATH_SUFFIX, object_name))
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.group.as_str())
    }

    pub fn entries(&self) -> &[BeanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Attribute names that are forwarded as gauges
#[derive(Debug, Clone, Default)]
pub struct MetricWhitelist {
    attributes: HashMap<String, String>,
}

impl MetricWhitelist {
    /// Build a whitelist from (attribute name, owning group) pairs
    pub fn from_pairs<A, G, I>(pairs: I) -> Self
    where
        A: Into<String>,
        G: Into<String>,
        I: IntoIterator<Item = (A, G)>,
    {
        let attributes = pairs
            .into_iter()
            .map(|(a, g)| (a.into(), g.into()))
            .collect();
        Self { attributes }
    }

    /// The built-in Presto coordinator whitelist
    pub fn presto() -> Self {
        Self::from_pairs(PRESTO_WHITELIST.iter().copied())
    }

    /// Whether an attribute should be forwarded; key presence only
    pub fn should_forward(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }

    /// Group the attribute is listed under
    pub fn owner(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
