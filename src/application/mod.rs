pub mod import;
pub mod import_service;
