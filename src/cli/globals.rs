use crate::directory::DirectoryConfig;
use std::str::FromStr;

/// How actions print the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("invalid output format '{other}', expected 'text' or 'json'")),
        }
    }
}

/// Settings shared by every action.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub directory: DirectoryConfig,
    pub output: OutputFormat,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(directory: DirectoryConfig) -> Self {
        Self {
            directory,
            output: OutputFormat::default(),
        }
    }

    pub fn set_output(&mut self, output: OutputFormat) {
        self.output = output;
    }
}
