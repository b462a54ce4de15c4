// src/utils/mod.rs

pub mod caller;
pub mod payload;
