//! Flutter bridge crate for SchemeLink core.

pub mod api;
