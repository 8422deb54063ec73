//! # Use Cases
//!
//! アプリケーションのユースケース

pub mod run_extract;
