//! Execution primitives shared by providers and gateways.

pub mod http;
