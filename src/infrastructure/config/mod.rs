//! Configuration loading, validation and logging setup.

pub mod engine;
pub mod logging;
pub mod settings;
pub mod sources;

pub use engine::EngineSettings;
pub use logging::LoggingConfig;
pub use settings::Config;
pub use sources::{ResolverSettings, SourcesSettings};
