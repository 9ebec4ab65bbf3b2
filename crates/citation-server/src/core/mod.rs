//! Core service logic shared across handlers

pub mod validation;
