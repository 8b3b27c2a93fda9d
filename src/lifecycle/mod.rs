//! Lifecycle Module
//!
//! Orchestrates the startup and shutdown of a [`crate::context::Context`] and the
//! modules that share it.
//!
//! # Lifecycle Phases
//!
//! ```text
//! 1. Configuration Loading (AppConfig::from_env)
//!    ↓
//! 2. Context Creation
//!    ↓
//! 3. Module Registration
//!    ↓
//! 4. Dependency Resolution (topological order, cycles rejected)
//!    ↓
//! 5. Context::initialize               ← database connect
//!    ↓
//! 6. ModuleHost::initialize (each module, in order)
//!      on_before_init → setup_services → setup_routes → on_after_init
//!    ↓
//! 7. Server Start
//!    ↓
//! [Running...]
//!    ↓
//! 8. Shutdown Signal (SIGTERM/SIGINT)
//!    ↓
//! 9. ModuleHost::shutdown (each module, reverse order) ← cleanup
//!    ↓
//! 10. Context::shutdown                ← database disconnect
//! ```

mod application;
mod error;
mod graph;
mod shutdown;

pub use application::{Application, ApplicationBuilder, ApplicationHealth};
pub use error::{LifecycleError, Result};
pub use graph::resolve_order;
pub use shutdown::shutdown_signal;
