#![allow(dead_code)]

use ignitor::persistence::MemoryDatabase;
use ignitor::prelude::*;
use std::sync::Mutex;

/// Shared, ordered record of lifecycle calls across modules.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn memory_context() -> Arc<Context> {
    Arc::new(Context::new(
        AppConfig::default(),
        Arc::new(MemoryDatabase::new()),
    ))
}

/// A module that appends `<name>.<hook>` to a [`CallLog`] and can be told to fail
/// at one hook.
pub struct RecordingModule {
    name: &'static str,
    dependencies: &'static [&'static str],
    log: CallLog,
    fail_at: Option<&'static str>,
    healthy: bool,
}

impl RecordingModule {
    pub fn new(name: &'static str, log: &CallLog) -> Self {
        Self {
            name,
            dependencies: &[],
            log: Arc::clone(log),
            fail_at: None,
            healthy: true,
        }
    }

    pub fn depends_on(mut self, dependencies: &'static [&'static str]) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn failing_at(mut self, hook: &'static str) -> Self {
        self.fail_at = Some(hook);
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    fn record(&self, hook: &str) -> ignitor::Result<()> {
        self.log.lock().unwrap().push(format!("{}.{}", self.name, hook));
        if self.fail_at == Some(hook) {
            return Err(IgnitorError::Internal(format!("{} failed in {}", self.name, hook)));
        }
        Ok(())
    }
}

#[async_trait]
impl Module for RecordingModule {
    fn name(&self) -> &str {
        self.name
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    fn dependencies(&self) -> &[&'static str] {
        self.dependencies
    }

    async fn on_before_init(&mut self, _ctx: &Arc<Context>) -> ignitor::Result<()> {
        self.record("on_before_init")
    }

    async fn setup_services(&mut self, _ctx: &Arc<Context>) -> ignitor::Result<()> {
        self.record("setup_services")
    }

    async fn setup_routes(&mut self, _ctx: &Arc<Context>) -> ignitor::Result<Router> {
        self.record("setup_routes")?;
        let path = format!("/{}", self.name);
        let name = self.name;
        Ok(Router::new().route(&path, axum::routing::get(move || async move { name })))
    }

    async fn on_after_init(&mut self, _ctx: &Arc<Context>) -> ignitor::Result<()> {
        self.record("on_after_init")
    }

    async fn cleanup(&mut self) -> ignitor::Result<()> {
        self.record("cleanup")
    }

    async fn health_check(&self) -> HealthStatus {
        if self.healthy {
            HealthStatus::healthy()
        } else {
            HealthStatus::unhealthy(Some(serde_json::json!({ "reason": "degraded" })))
        }
    }
}
