//! # Signature Descriptors
//!
//! A static description of an operation's parameters: their kind, their
//! declared order, and their defaults.
//!
//! ## Invariants
//!
//! Checked once by [`SignatureBuilder::build`], never at call time:
//!
//! - Parameter names are unique and non-empty.
//! - Kinds appear in group order: positional-only, then positional-or-keyword,
//!   then keyword-only.
//! - Among the positional-capable parameters, no required parameter follows
//!   a defaulted one. Keyword-only parameters may mix freely.
//!
//! The receiver slot is never part of a signature.

use crate::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("parameter name must not be empty")]
    EmptyName,
    #[error("duplicate parameter name '{0}'")]
    DuplicateParameter(String),
    /// A parameter was declared in an earlier kind group than its predecessor.
    #[error("{kind} parameter '{name}' cannot follow {previous} parameter")]
    KindOutOfOrder {
        name: String,
        kind: ParameterKind,
        previous: ParameterKind,
    },
    #[error("non-default argument '{0}' follows default argument")]
    RequiredAfterDefault(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// How a parameter may be supplied. Ordered by declaration group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParameterKind {
    PositionalOnly,
    PositionalOrKeyword,
    KeywordOnly,
}

impl ParameterKind {
    pub fn accepts_positional(self) -> bool {
        self != Self::KeywordOnly
    }

    pub fn accepts_keyword(self) -> bool {
        self != Self::PositionalOnly
    }
}

impl std::fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PositionalOnly => write!(f, "positional-only"),
            Self::PositionalOrKeyword => write!(f, "positional-or-keyword"),
            Self::KeywordOnly => write!(f, "keyword-only"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterKind,
    pub default: Option<Value>,
}

impl Parameter {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// An immutable, validated parameter list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    params: Vec<Parameter>,
    positional_count: usize,
}

impl Signature {
    pub fn builder() -> SignatureBuilder {
        SignatureBuilder::default()
    }

    /// The signature of an operation that takes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validates an explicit parameter list.
    pub fn new(params: Vec<Parameter>) -> Result<Self> {
        SignatureBuilder { params }.build()
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of parameters that can be filled positionally. These are
    /// always the leading `positional_count` entries of [`Self::params`].
    pub fn positional_count(&self) -> usize {
        self.positional_count
    }

    /// Declaration index of the parameter called `name`.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Fluent builder for [`Signature`], in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SignatureBuilder {
    params: Vec<Parameter>,
}

impl SignatureBuilder {
    fn push(mut self, name: impl Into<String>, kind: ParameterKind, default: Option<Value>) -> Self {
        self.params.push(Parameter {
            name: name.into(),
            kind,
            default,
        });
        self
    }

    /// A required positional-or-keyword parameter.
    pub fn param(self, name: impl Into<String>) -> Self {
        self.push(name, ParameterKind::PositionalOrKeyword, None)
    }

    pub fn param_with_default(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.push(name, ParameterKind::PositionalOrKeyword, Some(default.into()))
    }

    pub fn positional_only(self, name: impl Into<String>) -> Self {
        self.push(name, ParameterKind::PositionalOnly, None)
    }

    pub fn positional_only_with_default(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.push(name, ParameterKind::PositionalOnly, Some(default.into()))
    }

    pub fn keyword_only(self, name: impl Into<String>) -> Self {
        self.push(name, ParameterKind::KeywordOnly, None)
    }

    pub fn keyword_only_with_default(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.push(name, ParameterKind::KeywordOnly, Some(default.into()))
    }

    pub fn build(self) -> Result<Signature> {
        let mut previous: Option<ParameterKind> = None;
        let mut seen_default = false;

        for (i, param) in self.params.iter().enumerate() {
            if param.name.is_empty() {
                return Err(Error::EmptyName);
            }
            if self.params[..i].iter().any(|p| p.name == param.name) {
                return Err(Error::DuplicateParameter(param.name.clone()));
            }

            if let Some(previous) = previous {
                if param.kind < previous {
                    return Err(Error::KindOutOfOrder {
                        name: param.name.clone(),
                        kind: param.kind,
                        previous,
                    });
                }
            }
            previous = Some(param.kind);

            if param.kind.accepts_positional() {
                if param.default.is_some() {
                    seen_default = true;
                } else if seen_default {
                    return Err(Error::RequiredAfterDefault(param.name.clone()));
                }
            }
        }

        let positional_count = self.params
            .iter()
            .take_while(|p| p.kind.accepts_positional())
            .count();

        Ok(Signature {
            params: self.params,
            positional_count,
        })
    }
}
