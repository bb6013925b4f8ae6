//! Control naming convention
//!
//! A control opts into automatic binding through its name:
//! `<prefix><d><HandlerKey>[<d><variant>]`, e.g. `action_Home_x`. Only the
//! first two delimiters split, so variants may contain the delimiter
//! themselves (`action_Home_unhome_x` has the variant `unhome_x`).

use vcpkit_settings::BindingSettings;

use crate::error::NameError;

/// Result of parsing a candidate control name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Second segment, names the handler family
    pub handler_key: String,
    /// Everything after the second delimiter, empty when absent
    pub variant: String,
}

/// Prefix and delimiter that make a name bindable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConvention {
    prefix: String,
    delimiter: char,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::new("action", '_')
    }
}

impl NamingConvention {
    pub fn new(prefix: impl Into<String>, delimiter: char) -> Self {
        Self {
            prefix: prefix.into(),
            delimiter,
        }
    }

    pub fn from_settings(settings: &BindingSettings) -> Self {
        Self::new(settings.discovery_prefix.clone(), settings.delimiter)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Split a control name into handler key and variant.
    pub fn parse(&self, name: &str) -> Result<ParsedName, NameError> {
        let mut parts = name.splitn(3, self.delimiter);

        if parts.next() != Some(self.prefix.as_str()) {
            return Err(NameError::NotCandidate);
        }

        let handler_key = match parts.next() {
            Some(key) if !key.is_empty() => key,
            _ => {
                return Err(NameError::Malformed {
                    name: name.to_string(),
                })
            }
        };

        Ok(ParsedName {
            handler_key: handler_key.to_string(),
            variant: parts.next().unwrap_or_default().to_string(),
        })
    }

    /// Compose a name that parses back to `key` and `variant`
    pub fn compose(&self, key: &str, variant: &str) -> String {
        if variant.is_empty() {
            format!("{}{}{}", self.prefix, self.delimiter, key)
        } else {
            format!(
                "{}{d}{}{d}{}",
                self.prefix,
                key,
                variant,
                d = self.delimiter
            )
        }
    }
}
