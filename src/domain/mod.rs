pub mod canvas;
pub mod cluster;
pub mod columns;
pub mod interval;
pub mod layout;
pub mod models;
