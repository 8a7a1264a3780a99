// src/lib.rs
pub mod analysis;
pub mod charts;
pub mod fetch;
pub mod indicators;
pub mod quality;
pub mod report;
pub mod utils;
