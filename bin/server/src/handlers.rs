//! HTTP request handlers

pub mod error;
pub mod form;
pub mod upload;
