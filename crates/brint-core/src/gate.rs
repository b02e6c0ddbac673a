//! Gate declarations and the outcome table
//!
//! ```text
//! current >= gate | old  | new  | outcome
//! ----------------+------+------+------------------
//! true            |  -   | yes  | Substitution::New
//! true            |  -   | no   | Substitution::Passthrough
//! false           | yes  |  -   | Substitution::Old
//! false           | no   |  -   | Substitution::Passthrough
//! ```

use crate::version::{gate_passes, SemanticVersion};

/// One version-scoped decision point
///
/// `T` is whatever the caller swaps: a function pointer, a constructor, a
/// boxed trait object. The declaration is consumed when it is evaluated.
#[derive(Debug, Clone)]
pub struct GateDeclaration<T> {
    pub name: String,
    pub version: SemanticVersion,
    pub old: Option<T>,
    pub new: Option<T>,
    pub author: Option<String>,
    pub description: Option<String>,
}

impl<T> GateDeclaration<T> {
    /// Create a declaration from an already-parsed version
    pub fn declare(name: impl Into<String>, version: SemanticVersion) -> Self {
        Self {
            name: name.into(),
            version,
            old: None,
            new: None,
            author: None,
            description: None,
        }
    }

    /// Replacement used while the gate version has not arrived
    pub fn old(mut self, old: T) -> Self {
        self.old = Some(old);
        self
    }

    /// Replacement used once the gate version has arrived
    pub fn new(mut self, new: T) -> Self {
        self.new = Some(new);
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The selected substitution for a declared symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution<T> {
    /// Gate arrived and a `new` replacement was supplied
    New(T),
    /// Gate not arrived and an `old` replacement was supplied
    Old(T),
    /// Keep the declared symbol
    Passthrough,
}

impl<T> Substitution<T> {
    /// Apply the substitution to the declared symbol
    ///
    /// The declared symbol is dropped when a replacement wins.
    pub fn apply(self, declared: T) -> T {
        match self {
            Substitution::New(replacement) | Substitution::Old(replacement) => replacement,
            Substitution::Passthrough => declared,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, Substitution::Passthrough)
    }

    /// Label used in logs and CLI output
    pub fn label(&self) -> &'static str {
        match self {
            Substitution::New(_) => "new",
            Substitution::Old(_) => "old",
            Substitution::Passthrough => "passthrough",
        }
    }
}

/// Evaluate a declaration against the resolved current version
pub fn evaluate<T>(declaration: GateDeclaration<T>, current: &SemanticVersion) -> Substitution<T> {
    let arrived = gate_passes(&declaration.version, current);

    let substitution = match (arrived, declaration.new, declaration.old) {
        (true, Some(new), _) => Substitution::New(new),
        (false, _, Some(old)) => Substitution::Old(old),
        _ => Substitution::Passthrough,
    };

    log::debug!(
        "feature '{}': gate {} vs current {} (arrived: {}) -> {}",
        declaration.name,
        declaration.version,
        current,
        arrived,
        substitution.label()
    );

    substitution
}
