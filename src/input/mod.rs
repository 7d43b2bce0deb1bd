//! Input processing module
//! Handles data file detection, profile and job loading, and upload validation

pub mod file_detector;
pub mod manager;
pub mod upload;

pub use manager::InputManager;
