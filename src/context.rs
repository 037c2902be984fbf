use std::sync::Arc;

use crate::config::AppConfig;
use crate::event::EventContext;
use crate::services::{HostService, LanguageModelService, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub event: EventContext,
    pub host: Arc<dyn HostService>,
    pub language_model: Arc<dyn LanguageModelService>,
    pub version_control: Arc<dyn VersionControlService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        event: EventContext,
        host: Arc<dyn HostService>,
        language_model: Arc<dyn LanguageModelService>,
        version_control: Arc<dyn VersionControlService>,
    ) -> Self {
        Self {
            config,
            event,
            host,
            language_model,
            version_control,
        }
    }
}
