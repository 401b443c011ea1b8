//! HTTP method restrictions.

use std::fmt;

use http::Method;

const KNOWN: [(&str, u16); 9] = [
    ("GET", 1),
    ("POST", 1 << 1),
    ("DELETE", 1 << 2),
    ("HEAD", 1 << 3),
    ("OPTIONS", 1 << 4),
    ("PUT", 1 << 5),
    ("PATCH", 1 << 6),
    ("CONNECT", 1 << 7),
    ("TRACE", 1 << 8),
];

fn bit(token: &str) -> Option<u16> {
    KNOWN
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|(_, bit)| *bit)
}

/// The set of HTTP methods a parameter participates in.
///
/// The empty declaration means every method, including extension methods.
///
/// # Example
///
/// ```rust
/// use sieve_core::MethodSet;
/// use http::Method;
///
/// let methods = MethodSet::parse("post, Put").unwrap();
/// assert!(methods.contains(&Method::POST));
/// assert!(!methods.contains(&Method::GET));
/// assert_eq!(methods.to_string(), "POST,PUT");
///
/// assert!(MethodSet::parse("").unwrap().is_all());
/// assert_eq!(MethodSet::parse("GET,FETCH").unwrap_err(), "FETCH");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodSet(Option<u16>);

impl MethodSet {
    /// The unrestricted set.
    pub const ALL: Self = Self(None);

    /// Parses a comma-separated, case-insensitive method list.
    ///
    /// Returns the first unrecognized token on failure.
    pub fn parse(list: &str) -> Result<Self, String> {
        let mut mask = 0;
        for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            mask |= bit(token).ok_or_else(|| token.to_string())?;
        }
        Ok(if mask == 0 { Self::ALL } else { Self(Some(mask)) })
    }

    /// Returns true if the set places no restriction.
    #[must_use]
    pub fn is_all(self) -> bool {
        self.0.is_none()
    }

    /// Returns true if a request with `method` includes the parameter.
    #[must_use]
    pub fn contains(self, method: &Method) -> bool {
        match self.0 {
            None => true,
            Some(mask) => bit(method.as_str()).is_some_and(|b| mask & b != 0),
        }
    }
}

impl Default for MethodSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for MethodSet {
    /// Writes the methods in canonical order, comma separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(mask) = self.0 else {
            return Ok(());
        };
        let names: Vec<&str> = KNOWN
            .iter()
            .filter(|(_, bit)| mask & bit != 0)
            .map(|(name, _)| *name)
            .collect();
        f.write_str(&names.join(","))
    }
}
