pub mod error;
pub mod object_record;
pub mod scan_config;
pub mod scan_mode;
pub mod scan_result;
