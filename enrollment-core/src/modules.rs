pub mod capture_controller;
pub mod capture_state;
pub mod capture_surface;
pub mod config;
pub mod constants;
pub mod data_url;
pub mod error;
pub mod geometry;
