use std::sync::Arc;

use vision_common::config::Config;
use vision_common::scanning::ScanEngine;
use vision_core::ScanService;

use crate::registry::ActiveScans;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn ScanEngine>,
    pub active: ActiveScans,
}

impl AppState {
    pub fn new(engine: Arc<dyn ScanEngine>) -> Self {
        Self {
            engine,
            active: ActiveScans::default(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(Arc::new(ScanService::from_config(cfg)))
    }
}
