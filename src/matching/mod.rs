// src/matching/mod.rs
pub mod matcher;
pub mod name;
pub mod similarity;
