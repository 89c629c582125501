pub mod api;
pub mod app_state;
pub mod config;
pub mod digest;
pub mod extract;
pub mod fetcher;
pub mod job;
pub mod notify;
pub mod scheduler;
