//! File output for projection results.

pub mod export;
