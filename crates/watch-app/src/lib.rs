//! Application context for the watchlist background core
//!
//! Wires the owned stores, the job scheduler, the report pipeline, and the
//! alert evaluator into one [`AppContext`] created at startup and torn down
//! on shutdown. The excluded HTTP layer talks to the context; nothing in the
//! workspace reaches for ambient global state.

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod triggers;

pub use config::{AppConfig, AppConfigBuilder};
pub use context::{AppContext, AppContextBuilder, jobs};
pub use error::{AppError, Result};
pub use logging::init_tracing;
pub use triggers::TriggerLog;
