pub mod config;
pub mod logging;

// Core modules
pub mod artifact;
pub mod batch;
pub mod downloader;
pub mod manifest;
pub mod probe;
pub mod storage;
