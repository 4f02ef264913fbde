pub mod config;
pub mod csv_export;
pub mod file;

pub use config::AppConfig;
pub use file::load_order;
