//! The pluggable diagnostics sink. The session never calls `tracing` (or
//! any other backend) directly — it depends on this trait object so a host
//! embedding the client can route logs anywhere it likes, with
//! [`TracingLogger`] as the sensible do-nothing-extra default.

use std::collections::HashMap;
use std::sync::Arc;

pub type Context = HashMap<String, String>;

pub trait Logger: Send + Sync {
    fn debug(&self, message: &str, context: Option<&Context>);
    fn info(&self, message: &str, context: Option<&Context>);
    fn warn(&self, message: &str, context: Option<&Context>);
    fn error(&self, message: &str, context: Option<&Context>);
}

/// Backs the `Logger` trait with `tracing`'s leveled, structured macros.
#[derive(Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str, context: Option<&Context>) {
        match context {
            Some(ctx) => tracing::debug!(?ctx, "{message}"),
            None => tracing::debug!("{message}"),
        }
    }

    fn info(&self, message: &str, context: Option<&Context>) {
        match context {
            Some(ctx) => tracing::info!(?ctx, "{message}"),
            None => tracing::info!("{message}"),
        }
    }

    fn warn(&self, message: &str, context: Option<&Context>) {
        match context {
            Some(ctx) => tracing::warn!(?ctx, "{message}"),
            None => tracing::warn!("{message}"),
        }
    }

    fn error(&self, message: &str, context: Option<&Context>) {
        match context {
            Some(ctx) => tracing::error!(?ctx, "{message}"),
            None => tracing::error!("{message}"),
        }
    }
}

pub fn default_logger() -> Arc<dyn Logger> {
    Arc::new(TracingLogger)
}
