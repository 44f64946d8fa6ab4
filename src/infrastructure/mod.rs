pub mod config;
pub mod error;
pub mod layout_cache;
pub mod task_feed;
