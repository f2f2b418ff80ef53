//! Odoo client - session lifecycle, module verification, and RPC invocation
//!
//! This crate owns the stateful core of a client-side Odoo session:
//!
//! - **Connection management**: authenticate, bounded automatic retry,
//!   periodic liveness monitoring, explicit teardown
//! - **Session state**: the single source of truth a view layer reads
//! - **Module sequencing**: ordered verification of required server-side
//!   modules with per-module outcomes and an aggregate summary
//! - **Invocation**: the connected-gated JSON-RPC call layer
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  view layer  │  CLI / UI: reads snapshots, invokes operations
//! └──────┬───────┘
//! ┌──────▼───────┐
//! │ odoo-client  │  This crate
//! │  ┌─────────┐ │
//! │  │ Client  │ │  connect / disconnect / monitor / load modules
//! │  └─────────┘ │
//! │  ┌─────────┐ │
//! │  │ Invoker │ │  call_method / search_read
//! │  └─────────┘ │
//! │  ┌─────────┐ │
//! │  │ Transp. │ │  JSON-RPC over HTTP (reqwest)
//! │  └─────────┘ │
//! └──────────────┘
//! ```
//!
//! # Decoupling via Transport
//!
//! The [`Client`] talks to the wire exclusively through the [`Transport`]
//! trait ("send a JSON-RPC request, receive the result or an error"), so the
//! session logic can be exercised against a scripted transport in tests
//! while production uses [`HttpTransport`].

pub mod config;
pub mod connection;
pub mod error;
pub mod invoker;
pub mod sequencer;
pub mod session;
pub mod transport;

// Re-export key types at crate root
pub use config::{ClientConfig, Config, ModuleConfig};
pub use connection::{Client, ConnectFailure, MonitorHandle};
pub use error::{Error, Result};
pub use sequencer::{LoadSummary, ModuleCheckState, ModuleOutcome, ModuleStatus, OutcomeKind};
pub use session::{ConnectionStatus, SessionSnapshot};
pub use transport::{HttpTransport, Transport};

pub use odoo_protocol as protocol;
pub use odoo_protocol::Identity;
