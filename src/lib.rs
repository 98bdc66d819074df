//! Bridge between an interactive gdb session and a Vim server.
//!
//! gdb runs on a pseudo-terminal. Three filters move bytes around it:
//!
//! ```text
//! stdin ──► InputRelay ──────┐
//!                            ├─► DebuggerInput ─► pty ─► gdb
//! editor pipe ─► PipeRelay ──┘                           │
//!                                                        ▼
//! terminal ◄── OutputFilter ◄──────────────────────── pty
//!                   │
//!                   └─► EditorClient ─► vim --remote-send
//! ```
//!
//! [`controller::run`] wires the pieces together for one session.

pub mod banner;
pub mod cli;
pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod filters;
pub mod logging;
pub mod protocol;
pub mod pty;
pub mod shutdown;

pub use error::SessionError;
