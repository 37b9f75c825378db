use crate::library::logger::interface::{join_namespace, Logger};
use chrono::Utc;
use std::sync::Arc;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

#[derive(Debug, Clone, Default)]
pub struct LoggerTracing {
    namespace: Option<String>,
}

impl LoggerTracing {
    pub fn new() -> Self {
        Self { namespace: None }
    }

    fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or("app")
    }
}

impl Logger for LoggerTracing {
    fn info(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!(namespace = self.namespace(), "{}", message);
        Ok(())
    }

    fn warn(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::warn!(namespace = self.namespace(), "{}", message);
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerTracing {
            namespace: Some(join_namespace(self.namespace.as_deref(), namespace)),
        })
    }
}

/// Timestamps log lines in a fixed offset instead of the host's local zone.
#[derive(Debug, Clone, Copy)]
pub struct FixedOffsetTime {
    timezone: chrono::FixedOffset,
}

impl FormatTime for FixedOffsetTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let local_time = Utc::now().with_timezone(&self.timezone);
        write!(w, "{}", local_time.format("%Y-%m-%d %I:%M:%S%.3f %p"))
    }
}

pub fn init(timezone: chrono::FixedOffset) {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_timer(FixedOffsetTime { timezone })
        .with_target(false)
        .init();
}
