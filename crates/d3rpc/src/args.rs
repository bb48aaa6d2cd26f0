//! Call-site arguments and their canonical, bound form.

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

use crate::Value;

/// Arguments exactly as a caller supplied them.
///
/// Lives for the duration of one bind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArguments {
    pub positional: Vec<Value>,
    pub keyword: IndexMap<String, Value>,
}

impl CallArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Adds a keyword argument. A repeated name replaces the earlier value.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

impl From<Vec<Value>> for CallArguments {
    fn from(positional: Vec<Value>) -> Self {
        Self {
            positional,
            keyword: IndexMap::new(),
        }
    }
}

/// Arguments resolved against a signature.
///
/// Every positional-capable parameter is in `positional`, in declaration
/// order. Every keyword-only parameter is in `keyword`, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundArguments {
    #[serde(rename = "args")]
    pub positional: Vec<Value>,
    #[serde(rename = "kwargs")]
    pub keyword: IndexMap<String, Value>,
}

impl BoundArguments {
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}
