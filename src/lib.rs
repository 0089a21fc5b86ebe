//! HS code hierarchy lookup for invoice line classification.
//!
//! The tariff book is a dash-indented outline. `tariff::HierarchyBuilder`
//! turns it into a breadcrumb, duty rate and procedures per code, and
//! `lookup::LookupService` attaches that context to nearest-neighbor search
//! results before they reach callers.

pub mod app;
pub mod classify;
pub mod config;
pub mod lookup;
pub mod search;
pub mod storage;
pub mod tariff;
#[cfg(test)]
mod tests;
