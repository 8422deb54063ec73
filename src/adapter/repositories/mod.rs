//! Adapter Repositories
//!
//! Repository traitのインフラ実装

pub mod csv_sink;
