//! Wire types for the Odoo JSON-RPC web API.
//!
//! This crate contains the serde-serializable types used for communication
//! with an Odoo server over its `/web/*` JSON-RPC 2.0 endpoints. These types
//! represent the "protocol layer" - the shapes of data as they appear on the
//! wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization/deserialization
//! - **1:1 with protocol**: Match what the server actually sends
//! - **Stable**: Changes only when the wire protocol changes
//!
//! Session lifecycle, module verification, and invocation logic live on top
//! of these types in `odoo-client`.

pub mod endpoints;
pub mod module;
pub mod rpc;
pub mod session;

pub use module::*;
pub use rpc::*;
pub use session::*;
