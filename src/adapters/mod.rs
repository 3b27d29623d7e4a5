pub mod export;
pub mod stores;
