//! HTTP handlers, grouped by feature.

pub mod handlers;
