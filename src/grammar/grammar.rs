use std::fmt;

use indexmap::IndexMap;

use super::{error::TransformError, EPSILON};

/// A single grammar character. Non-terminals are compared by the leading
/// character of their identifier only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(pub char);

impl Symbol {
    pub const EPSILON: Symbol = Symbol('ε');

    pub fn leading_of(s: &str) -> Option<Symbol> {
        s.chars().next().map(Symbol)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Production(String);

impl Production {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn epsilon() -> Self {
        Self(EPSILON.to_string())
    }

    pub fn is_epsilon(&self) -> bool {
        self.0 == EPSILON
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits off the leading symbol, returning it with the residual.
    pub fn split_leading(&self) -> Option<(Symbol, Production)> {
        let mut chars = self.0.chars();
        let first = chars.next()?;
        Some((Symbol(first), Production(chars.as_str().to_string())))
    }

    /// `self ++ name`, where `name` is usually a synthesized non-terminal.
    pub fn followed_by(&self, name: &str) -> Production {
        let mut s = String::with_capacity(self.0.len() + name.len());
        s.push_str(&self.0);
        s.push_str(name);
        Production(s)
    }
}

impl From<&str> for Production {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Symbol> for Production {
    fn from(s: Symbol) -> Self {
        Self(s.0.to_string())
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grammar {
    non_terminals: IndexMap<String, Vec<Production>>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.non_terminals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.non_terminals.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.non_terminals.contains_key(name)
    }

    pub fn productions(&self, name: &str) -> Option<&[Production]> {
        self.non_terminals.get(name).map(|p| p.as_slice())
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = (&str, &[Production])> {
        self.non_terminals
            .iter()
            .map(|(name, productions)| (name.as_str(), productions.as_slice()))
    }

    pub(crate) fn productions_mut(&mut self, name: &str) -> Option<&mut Vec<Production>> {
        self.non_terminals.get_mut(name)
    }

    /// Non-terminals in lexicographic order of their identifiers, independent
    /// of insertion order.
    pub fn sorted_non_terminal_iter(&self) -> impl Iterator<Item = (&str, &[Production])> {
        let mut entries = self.non_terminal_iter().collect::<Vec<_>>();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// Registers `name` without productions if it is not known yet.
    pub fn add_non_terminal(&mut self, name: &str) {
        if !self.non_terminals.contains_key(name) {
            self.non_terminals.insert(name.to_string(), Vec::new());
        }
    }

    pub fn add_production(&mut self, left: &str, right: Production) {
        self.non_terminals
            .entry(left.to_string())
            .or_default()
            .push(right);
    }

    pub fn extend_productions<I>(&mut self, left: &str, rights: I)
    where
        I: IntoIterator<Item = Production>,
    {
        self.non_terminals
            .entry(left.to_string())
            .or_default()
            .extend(rights);
    }

    pub fn sorted(&self) -> Grammar {
        let mut g = self.clone();
        g.non_terminals.sort_keys();
        g
    }
}

/// Splits the `index`-th production of `non_terminal`, failing on an empty one.
pub(crate) fn split_production(
    non_terminal: &str,
    index: usize,
    production: &Production,
) -> Result<(Symbol, Production), TransformError> {
    production
        .split_leading()
        .ok_or_else(|| TransformError::MalformedProduction {
            non_terminal: non_terminal.to_string(),
            index,
        })
}

impl<L, R> FromIterator<(L, R)> for Grammar
where
    L: Into<String>,
    R: IntoIterator,
    R::Item: Into<Production>,
{
    fn from_iter<T: IntoIterator<Item = (L, R)>>(iter: T) -> Self {
        let mut g = Grammar::new();
        for (left, rights) in iter {
            let left = left.into();
            g.add_non_terminal(&left);
            g.extend_productions(&left, rights.into_iter().map(Into::into));
        }
        g
    }
}
