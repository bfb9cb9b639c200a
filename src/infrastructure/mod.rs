pub mod fs_adapter;
pub mod http_adapter;
pub mod jsonl;
pub mod memory;
pub mod parsers;
