pub mod bootstrap;
pub mod commands;
pub mod day_partition;
pub mod fetch_guard;
pub mod timeline_service;
