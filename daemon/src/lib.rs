// KYC Daemon Library
// Exposes the table store and the operation dispatcher for the binary and tests

#![allow(clippy::type_complexity)]
#![allow(clippy::uninlined_format_args)]

extern crate log;

pub mod config;
pub mod core;
