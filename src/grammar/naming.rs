use log::warn;
use serde::Deserialize;

use super::{Grammar, TransformError, PRIME};

/// What to do when `A'` already names a non-terminal of the input grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    #[default]
    Fail,
    /// Append the synthesized alternatives to the existing entry.
    Merge,
}

pub fn prime_name(name: &str) -> String {
    let mut name = name.to_string();
    name.push(PRIME);
    name
}

/// Appends primes to `name` until `taken` no longer reports it.
pub fn fresh_name(mut name: String, taken: impl Fn(&str) -> bool) -> String {
    while taken(&name) {
        name.push(PRIME);
    }
    name
}

/// Synthesizes `A'` for `A`, checked against the identifiers of `existing`.
pub struct PrimeNamer<'a> {
    existing: &'a Grammar,
    policy: CollisionPolicy,
}

impl<'a> PrimeNamer<'a> {
    pub fn new(existing: &'a Grammar, policy: CollisionPolicy) -> Self {
        Self { existing, policy }
    }

    pub fn name_for(&self, non_terminal: &str) -> Result<String, TransformError> {
        let synthesized = prime_name(non_terminal);
        if !self.existing.contains(&synthesized) {
            return Ok(synthesized);
        }
        match self.policy {
            CollisionPolicy::Fail => Err(TransformError::IdentifierCollision {
                non_terminal: non_terminal.to_string(),
                synthesized,
            }),
            CollisionPolicy::Merge => {
                warn!(
                    "{} already exists, merging alternatives introduced for {}",
                    synthesized, non_terminal
                );
                Ok(synthesized)
            }
        }
    }
}
