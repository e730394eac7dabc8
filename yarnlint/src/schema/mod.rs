pub mod error;
pub mod validator;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

pub use error::SchemaError;
pub use validator::validate_command;

/// User-supplied definitions of known commands and enum types.
///
/// Field names follow the editor setting this schema is usually copied from
/// (`minArgs`, `maxArgs`, `types`), so the same JSON can be reused as-is.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CommandSchema {
    pub commands: BTreeMap<String, CommandDef>,
    pub enums: BTreeMap<String, Vec<String>>,
}

/// Arity bounds and positional argument types of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDef {
    pub min_args: Option<usize>,
    pub max_args: Option<usize>,
    pub types: Option<Vec<String>>,
}

/// How an argument is checked, resolved from a type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType<'a> {
    Number,
    String,
    Enum(&'a [String]),
    Unknown,
}

impl CommandSchema {
    /// Load a schema from a `.toml` or `.json` file.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("json") => Self::from_json_str(&text),
            other => Err(SchemaError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, SchemaError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_command(mut self, name: impl Into<String>, def: CommandDef) -> Self {
        self.commands.insert(name.into(), def);
        self
    }

    pub fn with_enum<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enums
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn command(&self, name: &str) -> Option<&CommandDef> {
        self.commands.get(name)
    }

    /// `number` and `string` are built in; any other name must be an enum.
    pub fn resolve_type(&self, name: &str) -> ArgType<'_> {
        match name {
            "number" => ArgType::Number,
            "string" => ArgType::String,
            _ => match self.enums.get(name) {
                Some(values) => ArgType::Enum(values),
                None => ArgType::Unknown,
            },
        }
    }
}

impl CommandDef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_args(mut self, n: usize) -> Self {
        self.min_args = Some(n);
        self
    }

    pub fn max_args(mut self, n: usize) -> Self {
        self.max_args = Some(n);
        self
    }

    /// Exactly `n` arguments.
    pub fn arity(self, n: usize) -> Self {
        self.min_args(n).max_args(n)
    }

    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = Some(types.into_iter().map(Into::into).collect());
        self
    }
}
