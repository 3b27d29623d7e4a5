pub mod activity_stats;
pub mod anomaly_report;
pub mod detection_config;
pub mod log_query;
pub mod log_record;
