//! # API Route Modules
//!
//! - `scan_link`: Payment-link scan requests: validation of the submitted
//!   payload and relay to the scanning service.

pub mod scan_link;
