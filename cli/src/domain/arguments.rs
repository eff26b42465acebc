//! Ordered command-line argument tokens and the formatting rules used to
//! append them.
//!
//! Tokens are never reordered once pushed: callers decide the final order by
//! the order of their calls.

use std::fmt::Display;

use crate::domain::config::StringOrList;

/// Joins a list value with `,`; a single value passes through unchanged.
#[must_use]
pub fn as_list_argument(value: &StringOrList) -> String {
    match value {
        StringOrList::One(s) => s.clone(),
        StringOrList::Many(items) => items.join(","),
    }
}

/// Flattens a single value or a list into a list of strings.
#[must_use]
pub fn as_array(value: &StringOrList) -> Vec<String> {
    match value {
        StringOrList::One(s) => vec![s.clone()],
        StringOrList::Many(items) => items.clone(),
    }
}

/// An append-only sequence of argument tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentList {
    tokens: Vec<String>,
}

impl ArgumentList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a token verbatim.
    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// Appends every token verbatim, keeping their order.
    pub fn extend<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(tokens.into_iter().map(Into::into));
    }

    /// Appends a bare `--name` when `enabled`.
    pub fn flag(&mut self, name: &str, enabled: bool) {
        if enabled {
            self.tokens.push(format!("--{name}"));
        }
    }

    /// Appends `--name=value` when a value is present.
    pub fn option<V: Display>(&mut self, name: &str, value: Option<V>) {
        if let Some(value) = value {
            self.tokens.push(format!("--{name}={value}"));
        }
    }

    /// Appends `--name=a,b,c` when a value is present, joining lists with `,`.
    pub fn list_option(&mut self, name: &str, value: Option<&StringOrList>) {
        self.option(name, value.map(as_list_argument));
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }
}
