//! HTTP surface for the static page

pub mod handlers;
