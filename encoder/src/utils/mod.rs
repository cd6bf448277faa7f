//! Utility functions for the application

pub mod decode;
pub mod otlp;
