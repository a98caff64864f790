pub mod backend;
pub mod config_cmd;
pub mod estimate;
pub mod log;
pub mod prompt;
pub mod report;
pub mod seed;
