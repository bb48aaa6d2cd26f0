//! # Ledger of exposed operations
//!
//! The Ledger is the dispatch table of a plugin client: it maps each
//! operation name to the signature its calls are bound against and the name
//! the host knows it by.
//!
//! ## Philosophy
//!
//! - **Registration-Time Safety**: signatures are validated when they are
//!   built and duplicate names are rejected when the ledger is built. Nothing
//!   about the table is checked on the call path.
//! - **Immutable**: once built, the ledger is only read.

use std::collections::HashMap;

use crate::signature::Signature;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("operation '{0}' is already registered")]
    DuplicateOperation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One exposed operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSchema {
    pub name: String,
    /// Identifier forwarded to the host.
    pub remote_name: String,
    pub signature: Signature,
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    operations: HashMap<String, OperationSchema>,
}

impl Ledger {
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&OperationSchema> {
        self.operations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Operation names, sorted.
    pub fn operation_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.operations.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Collects registrations; the first duplicate is reported by [`Self::build`].
#[derive(Debug, Default)]
pub struct LedgerBuilder {
    operations: Vec<OperationSchema>,
}

impl LedgerBuilder {
    /// Registers an operation forwarded under its own name.
    pub fn register(self, name: impl Into<String>, signature: Signature) -> Self {
        let name = name.into();
        let remote_name = name.clone();
        self.register_as(name, remote_name, signature)
    }

    /// Registers an operation forwarded under a different remote name.
    pub fn register_as(
        mut self,
        name: impl Into<String>,
        remote_name: impl Into<String>,
        signature: Signature,
    ) -> Self {
        self.operations.push(OperationSchema {
            name: name.into(),
            remote_name: remote_name.into(),
            signature,
        });
        self
    }

    pub fn build(self) -> Result<Ledger> {
        let mut operations = HashMap::with_capacity(self.operations.len());
        for schema in self.operations {
            if operations.contains_key(&schema.name) {
                return Err(Error::DuplicateOperation(schema.name));
            }
            operations.insert(schema.name.clone(), schema);
        }
        Ok(Ledger { operations })
    }
}
