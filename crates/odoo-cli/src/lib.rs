//! Command-line view over an Odoo client session.
//!
//! This crate holds no session logic: it constructs a
//! [`Client`](odoo::Client), invokes the core operations, and renders the
//! published state.

pub mod cli;
pub mod commands;
pub mod logging;
