pub mod host;
pub mod language_model;
pub mod version_control;

pub use host::HostService;
pub use language_model::LanguageModelService;
pub use version_control::VersionControlService;
