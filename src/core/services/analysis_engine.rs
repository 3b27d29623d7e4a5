use serde::Serialize;

use crate::core::models::activity_stats::ActivityStats;
use crate::core::models::anomaly_report::AnomalyReport;
use crate::core::models::detection_config::DetectionConfig;
use crate::core::models::log_query::LogQuery;
use crate::core::models::log_record::LogRecord;
use crate::core::services::aggregation_service::AggregationService;
use crate::core::services::anomaly_service::AnomalyService;
use crate::core::services::filter_service::FilterService;

/// Statistics and anomalies for one record set. `None` means no data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub stats: Option<ActivityStats>,
    pub anomalies: Option<AnomalyReport>,
}

/// Entry point shared by every caller: filter, then aggregate or detect.
///
/// Holds no state besides the detection settings; each call works on
/// the records it is handed.
pub struct AnalysisEngine {
    filter: FilterService,
    aggregator: AggregationService,
    detector: AnomalyService,
}

impl AnalysisEngine {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            filter: FilterService,
            aggregator: AggregationService,
            detector: AnomalyService::new(config),
        }
    }

    /// Filtered and ordered view of `records`.
    pub fn query(&self, records: Vec<LogRecord>, query: &LogQuery) -> Vec<LogRecord> {
        self.filter.filter(records, query)
    }

    pub fn query_then_aggregate(
        &self,
        records: Vec<LogRecord>,
        query: &LogQuery,
    ) -> Option<ActivityStats> {
        let selected = self.query(records, query);
        self.aggregator.aggregate(&selected)
    }

    pub fn query_then_detect(
        &self,
        records: Vec<LogRecord>,
        query: &LogQuery,
    ) -> Option<AnomalyReport> {
        let selected = self.query(records, query);
        self.detector.detect(&selected)
    }

    /// Statistics and anomalies over the same records.
    pub fn report(&self, records: &[LogRecord]) -> Report {
        Report {
            stats: self.aggregator.aggregate(records),
            anomalies: self.detector.detect(records),
        }
    }

    pub fn query_then_report(&self, records: Vec<LogRecord>, query: &LogQuery) -> Report {
        let selected = self.query(records, query);
        self.report(&selected)
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}
