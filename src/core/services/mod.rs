pub mod aggregation_service;
pub mod analysis_engine;
pub mod anomaly_service;
pub mod filter_service;
pub mod generator_service;
