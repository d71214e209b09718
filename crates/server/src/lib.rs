//! HTTP surface for book search and teaser summaries.

pub mod api;
pub mod metrics;
pub mod state;
