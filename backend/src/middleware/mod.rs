//! Request middleware applied by the HTTP server.

pub mod trace;
