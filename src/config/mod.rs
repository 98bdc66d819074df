mod loader;
mod settings;
mod types;

pub use loader::{ConfigError, MIN_LINE_LIMIT};
pub use settings::Settings;
pub use types::{
    Config, DebuggerConfig, EditorConfig, ParserConfig, PipeConfig, DEFAULT_SERVER,
};
