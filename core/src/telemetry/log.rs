use log::{debug, info, warn};

/// Scoped wrapper over the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct LogManager {
    scope: &'static str,
}

impl LogManager {
    pub fn new(scope: &'static str) -> Self {
        Self { scope }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.scope, message);
    }

    pub fn warn(&self, message: &str) {
        warn!("[{}] {}", self.scope, message);
    }

    pub fn debug(&self, message: &str) {
        debug!("[{}] {}", self.scope, message);
    }
}
