/// Slash command types.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Arg
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    String,
    Boolean,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandArg {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub arg_type: ArgType,
    pub required: bool,
}

// ---------------------------------------------------------------------------
// Command definition
// ---------------------------------------------------------------------------

/// A slash command entry in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDef {
    /// Unique key, also the slash name (e.g. "steaminvite").
    pub key: String,
    pub description: String,
    pub args: Vec<CommandArg>,
}

impl CommandDef {
    /// `/steaminvite <steamurl> [neverexpire]`
    pub fn usage(&self) -> String {
        let mut usage = format!("/{}", self.key);
        for arg in &self.args {
            if arg.required {
                usage.push_str(&format!(" <{}>", arg.name));
            } else {
                usage.push_str(&format!(" [{}]", arg.name));
            }
        }
        usage
    }
}

// ---------------------------------------------------------------------------
// Parsed invocation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    String(String),
    Boolean(bool),
}

/// A slash-command invocation with its named options, as delivered by the
/// chat platform.
#[derive(Debug, Clone, Default)]
pub struct CommandInvocation {
    pub key: String,
    pub options: HashMap<String, ArgValue>,
}

impl CommandInvocation {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            options: HashMap::new(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: ArgValue) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.options.get(name) {
            Some(ArgValue::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.options.get(name) {
            Some(ArgValue::Boolean(value)) => Some(*value),
            _ => None,
        }
    }
}
