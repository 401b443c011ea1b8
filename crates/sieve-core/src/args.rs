//! Per-request parse results.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::schema::HELP_PARAM;
use crate::{AccessError, Diagnostic, ParamType, ParamValues};

/// The typed outcome of parsing one request against a schema.
///
/// Values are stored only for parameters that coerced successfully. The
/// accessors return the zero value for a name with no stored value, and
/// treat a request for the wrong type as a programming error: the `try_*`
/// forms return [`AccessError::TypeMismatch`], the plain forms panic.
///
/// # Example
///
/// ```rust
/// use sieve_core::{ParamSpec, ParamType, Schema};
/// use sieve_extract::{ExtractConfig, ExtractionContextBuilder};
/// use http::{Method, Uri};
///
/// let schema = Schema::compile(
///     "/find",
///     vec![
///         ParamSpec::new("id").of_type(ParamType::Int).position(1),
///         ParamSpec::new("limit").of_type(ParamType::Int).default_value(20),
///     ],
/// )
/// .unwrap();
///
/// let ctx = ExtractionContextBuilder::new()
///     .method(Method::GET)
///     .uri(Uri::from_static("/find/0x1A"))
///     .build();
///
/// let args = schema.parse(&ctx, &ExtractConfig::default());
/// assert!(!args.has_errors());
/// assert_eq!(args.integer("id"), 26);
/// assert_eq!(args.integer("limit"), 20);
/// assert!(!args.has("limit"));
/// assert_eq!(args.arg(0), Some("0x1A"));
/// ```
#[derive(Debug, Clone)]
pub struct ParsedArgs {
    route: String,
    segments: Vec<String>,
    values: HashMap<String, ParamValues>,
    present: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
    types: Arc<HashMap<String, ParamType>>,
}

impl ParsedArgs {
    pub(crate) fn new(
        route: &str,
        segments: Vec<String>,
        types: Arc<HashMap<String, ParamType>>,
    ) -> Self {
        Self {
            route: route.to_string(),
            segments,
            values: HashMap::new(),
            present: HashSet::new(),
            diagnostics: Vec::new(),
            types,
        }
    }

    pub(crate) fn mark_present(&mut self, name: &str) {
        self.present.insert(name.to_string());
    }

    pub(crate) fn insert(&mut self, name: &str, values: ParamValues) {
        self.values.insert(name.to_string(), values);
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Returns the route the request was parsed against.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Returns the path segments after the route.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the path segment at a 0-based index.
    #[must_use]
    pub fn arg(&self, idx: usize) -> Option<&str> {
        self.segments.get(idx).map(String::as_str)
    }

    /// Returns the number of path segments after the route.
    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the request supplied the parameter explicitly.
    ///
    /// A substituted default does not count.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.present.contains(name)
    }

    /// Returns the stored values for a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValues> {
        self.values.get(name)
    }

    /// Returns the accumulated diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns true if the request did not satisfy the schema.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Returns true if the `help` flag resolved to true.
    #[must_use]
    pub fn help_requested(&self) -> bool {
        matches!(
            self.values.get(HELP_PARAM),
            Some(ParamValues::Bools(flags)) if flags.first() == Some(&true)
        )
    }

    fn lookup(&self, name: &str, requested: ParamType) -> Result<Option<&ParamValues>, AccessError> {
        match self.types.get(name) {
            Some(&declared) if declared != requested => Err(AccessError::TypeMismatch {
                name: name.to_string(),
                declared,
                requested,
            }),
            _ => Ok(self.values.get(name)),
        }
    }

    /// Returns all values of a `string` parameter.
    pub fn try_strings(&self, name: &str) -> Result<&[String], AccessError> {
        Ok(match self.lookup(name, ParamType::String)? {
            Some(ParamValues::Strings(v)) => v,
            _ => &[],
        })
    }

    /// Returns the first value of a `string` parameter, or `""`.
    pub fn try_string(&self, name: &str) -> Result<&str, AccessError> {
        Ok(self.try_strings(name)?.first().map_or("", String::as_str))
    }

    /// Returns all values of an `int` parameter.
    pub fn try_integers(&self, name: &str) -> Result<&[i64], AccessError> {
        Ok(match self.lookup(name, ParamType::Int)? {
            Some(ParamValues::Ints(v)) => v,
            _ => &[],
        })
    }

    /// Returns the first value of an `int` parameter, or `0`.
    pub fn try_integer(&self, name: &str) -> Result<i64, AccessError> {
        Ok(self.try_integers(name)?.first().copied().unwrap_or_default())
    }

    /// Returns all values of a `float` parameter.
    pub fn try_floats(&self, name: &str) -> Result<&[f64], AccessError> {
        Ok(match self.lookup(name, ParamType::Float)? {
            Some(ParamValues::Floats(v)) => v,
            _ => &[],
        })
    }

    /// Returns the first value of a `float` parameter, or `0.0`.
    pub fn try_float(&self, name: &str) -> Result<f64, AccessError> {
        Ok(self.try_floats(name)?.first().copied().unwrap_or_default())
    }

    /// Returns all values of a `bool` parameter.
    pub fn try_bools(&self, name: &str) -> Result<&[bool], AccessError> {
        Ok(match self.lookup(name, ParamType::Bool)? {
            Some(ParamValues::Bools(v)) => v,
            _ => &[],
        })
    }

    /// Returns the first value of a `bool` parameter, or `false`.
    pub fn try_bool(&self, name: &str) -> Result<bool, AccessError> {
        Ok(self.try_bools(name)?.first().copied().unwrap_or_default())
    }

    /// Returns all values of a `string` parameter.
    ///
    /// # Panics
    ///
    /// Panics if the parameter is declared with another type.
    #[must_use]
    pub fn strings(&self, name: &str) -> &[String] {
        self.try_strings(name).unwrap_or_else(|err| violated(&err))
    }

    /// Returns the first value of a `string` parameter, or `""`.
    ///
    /// # Panics
    ///
    /// Panics if the parameter is declared with another type.
    #[must_use]
    pub fn string(&self, name: &str) -> &str {
        self.try_string(name).unwrap_or_else(|err| violated(&err))
    }

    /// Returns all values of an `int` parameter.
    ///
    /// # Panics
    ///
    /// Panics if the parameter is declared with another type.
    #[must_use]
    pub fn integers(&self, name: &str) -> &[i64] {
        self.try_integers(name).unwrap_or_else(|err| violated(&err))
    }

    /// Returns the first value of an `int` parameter, or `0`.
    ///
    /// # Panics
    ///
    /// Panics if the parameter is declared with another type.
    #[must_use]
    pub fn integer(&self, name: &str) -> i64 {
        self.try_integer(name).unwrap_or_else(|err| violated(&err))
    }

    /// Returns all values of a `float` parameter.
    ///
    /// # Panics
    ///
    /// Panics if the parameter is declared with another type.
    #[must_use]
    pub fn floats(&self, name: &str) -> &[f64] {
        self.try_floats(name).unwrap_or_else(|err| violated(&err))
    }

    /// Returns the first value of a `float` parameter, or `0.0`.
    ///
    /// # Panics
    ///
    /// Panics if the parameter is declared with another type.
    #[must_use]
    pub fn float(&self, name: &str) -> f64 {
        self.try_float(name).unwrap_or_else(|err| violated(&err))
    }

    /// Returns all values of a `bool` parameter.
    ///
    /// # Panics
    ///
    /// Panics if the parameter is declared with another type.
    #[must_use]
    pub fn bools(&self, name: &str) -> &[bool] {
        self.try_bools(name).unwrap_or_else(|err| violated(&err))
    }

    /// Returns the first value of a `bool` parameter, or `false`.
    ///
    /// # Panics
    ///
    /// Panics if the parameter is declared with another type.
    #[must_use]
    pub fn bool(&self, name: &str) -> bool {
        self.try_bool(name).unwrap_or_else(|err| violated(&err))
    }
}

#[track_caller]
fn violated(err: &AccessError) -> ! {
    panic!("invariant violated: {err}")
}
