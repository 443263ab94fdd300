// src/reconciliation/mod.rs
pub mod report;
pub mod service;
