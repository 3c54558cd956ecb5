//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: shared test utilities
//! - `command_line`: real argument parsing
//! - `precedence`: layer precedence tests
//! - `operation_mode`: operation mode selection tests
//! - `field_resolution`: API URL, limits, and required field tests

mod helpers;
