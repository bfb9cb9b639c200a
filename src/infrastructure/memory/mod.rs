pub mod data_repo;
pub mod log_repo;
