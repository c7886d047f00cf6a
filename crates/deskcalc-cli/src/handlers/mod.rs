//! Command handlers

pub mod config;
pub mod eval;
pub mod press;
pub mod run;
