pub mod anomalies;
pub mod export;
pub mod generate;
pub mod init;
pub mod logs;
pub mod query_helpers;
pub mod report;
pub mod stats;
