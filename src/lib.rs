pub mod capture_record;
pub mod config;
pub mod device_camera;
pub mod device_display;
pub mod disease_db;
pub mod image_classifier;
pub mod image_normalizer;
pub mod library;
pub mod log_store;
pub mod prediction_formatter;
pub mod scanner;
