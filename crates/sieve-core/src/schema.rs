//! Schema compilation.
//!
//! A [`Schema`] is compiled once at startup from a list of [`ParamSpec`]s
//! and is read-only afterwards, so one instance can be shared by every
//! request on its route.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sieve_extract::canonical_route;

use crate::{MethodSet, ParamSpec, ParamType, Scalar, SchemaError, Validator};

/// Name of the implicit flag added by [`SchemaBuilder::with_help`].
pub const HELP_PARAM: &str = "help";

/// A validated parameter declaration.
#[derive(Debug, Clone)]
pub struct CompiledParam {
    pub(crate) name: String,
    pub(crate) param_type: ParamType,
    pub(crate) default: Scalar,
    pub(crate) required: bool,
    pub(crate) position: u32,
    pub(crate) methods: MethodSet,
    pub(crate) memo: String,
    pub(crate) validator: Option<Validator>,
}

impl CompiledParam {
    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type.
    #[must_use]
    pub fn param_type(&self) -> ParamType {
        self.param_type
    }

    /// Returns the default, or the type's zero value if none was declared.
    #[must_use]
    pub fn default(&self) -> &Scalar {
        &self.default
    }

    /// Returns true if the parameter must be supplied.
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns the 1-based segment index, or `0` for a named parameter.
    #[must_use]
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Returns the methods the parameter participates in.
    #[must_use]
    pub fn methods(&self) -> MethodSet {
        self.methods
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn memo(&self) -> &str {
        &self.memo
    }

    /// Returns the validator, if any.
    #[must_use]
    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    fn stub(&self) -> String {
        if self.required {
            format!("<{}>", self.name)
        } else {
            format!("[{}]", self.name)
        }
    }
}

fn quoted(value: &Scalar) -> String {
    match value {
        Scalar::String(s) => format!("{s:?}"),
        other => other.to_string(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn typed_default(
    name: &str,
    param_type: ParamType,
    default: Option<Scalar>,
) -> Result<Scalar, SchemaError> {
    match (param_type, default) {
        (_, None) => Ok(Scalar::zero(param_type)),
        // Integral defaults widen to float.
        (ParamType::Float, Some(Scalar::Int(i))) => Ok(Scalar::Float(i as f64)),
        (_, Some(value)) if value.param_type() == param_type => Ok(value),
        (_, Some(value)) => Err(SchemaError::InvalidDefault {
            name: name.to_string(),
            expected: param_type,
            value: quoted(&value),
        }),
    }
}

fn check_purpose(spec: &ParamSpec) -> Result<(), SchemaError> {
    let bare = spec.type_name.is_empty()
        && spec.default.is_none()
        && !spec.required
        && spec.position == 0
        && spec.methods.is_empty()
        && spec.validator.is_none();
    if bare {
        Ok(())
    } else {
        Err(SchemaError::InvalidPurpose)
    }
}

fn compile_param(spec: ParamSpec) -> Result<CompiledParam, SchemaError> {
    let param_type: ParamType = spec.type_name.parse()?;
    let default = typed_default(&spec.name, param_type, spec.default)?;
    let methods = MethodSet::parse(&spec.methods).map_err(|method| SchemaError::InvalidMethod {
        name: spec.name.clone(),
        method,
    })?;
    if param_type == ParamType::Bool && spec.validator.is_some() {
        return Err(SchemaError::BoolValidator(spec.name));
    }

    Ok(CompiledParam {
        name: spec.name,
        param_type,
        default,
        required: spec.required,
        position: spec.position,
        methods,
        memo: spec.memo,
        validator: spec.validator,
    })
}

/// The compiled, immutable parameter set of one route.
///
/// # Example
///
/// ```rust
/// use sieve_core::{ParamSpec, ParamType, Schema};
///
/// let schema = Schema::compile(
///     "/api/find/",
///     vec![
///         ParamSpec::purpose("find records"),
///         ParamSpec::new("id").of_type(ParamType::Int).position(1).required(),
///         ParamSpec::new("q").required(),
///         ParamSpec::new("limit").of_type(ParamType::Int).default_value(20),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(schema.route(), "/api/find");
/// assert_eq!(schema.purpose(), "find records");
/// assert_eq!(schema.usage(), "/api/find/<id>?[limit]&<q>");
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    route: String,
    purpose: String,
    positional: Vec<CompiledParam>,
    named: Vec<CompiledParam>,
    types: Arc<HashMap<String, ParamType>>,
    help: bool,
}

impl Schema {
    /// Compiles a route's parameter declarations.
    ///
    /// Compilation fails fast on the first invalid declaration.
    pub fn compile(
        route: &str,
        specs: impl IntoIterator<Item = ParamSpec>,
    ) -> Result<Self, SchemaError> {
        Self::compile_with(route, specs, false)
    }

    /// Starts building a schema for a route.
    #[must_use]
    pub fn builder(route: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(route)
    }

    fn compile_with(
        route: &str,
        specs: impl IntoIterator<Item = ParamSpec>,
        help: bool,
    ) -> Result<Self, SchemaError> {
        let route = canonical_route(route).to_string();
        let result = Self::build(route.clone(), specs, help);
        match &result {
            Ok(schema) => tracing::debug!(
                route = %schema.route,
                positional = schema.positional.len(),
                named = schema.named.len(),
                help,
                "compiled schema"
            ),
            Err(err) => tracing::warn!(route = %route, error = %err, "schema rejected"),
        }
        result
    }

    fn build(
        route: String,
        specs: impl IntoIterator<Item = ParamSpec>,
        help: bool,
    ) -> Result<Self, SchemaError> {
        let implicit = help.then(|| {
            ParamSpec::new(HELP_PARAM)
                .of_type(ParamType::Bool)
                .memo("show usage")
        });

        let mut purpose = None;
        let mut seen = HashSet::new();
        let mut positional = Vec::new();
        let mut named = Vec::new();

        for spec in implicit.into_iter().chain(specs) {
            if spec.is_purpose() {
                if purpose.is_some() {
                    return Err(SchemaError::DuplicatePurpose);
                }
                check_purpose(&spec)?;
                purpose = Some(spec.memo);
                continue;
            }
            if !seen.insert(spec.name.clone()) {
                return Err(SchemaError::DuplicateName(spec.name));
            }

            let param = compile_param(spec)?;
            if param.position > 0 {
                positional.push(param);
            } else {
                named.push(param);
            }
        }

        positional.sort_by_key(|p: &CompiledParam| p.position);
        if let Some(pair) = positional
            .windows(2)
            .find(|pair| pair[0].position == pair[1].position)
        {
            return Err(SchemaError::DuplicatePosition {
                position: pair[0].position,
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
            });
        }
        named.sort_by(|a, b| a.name.cmp(&b.name));

        let types = positional
            .iter()
            .chain(&named)
            .map(|p| (p.name.clone(), p.param_type))
            .collect();

        Ok(Self {
            route,
            purpose: purpose.unwrap_or_default(),
            positional,
            named,
            types: Arc::new(types),
            help,
        })
    }

    /// Returns the canonical route (no trailing `/`).
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Returns the free-text purpose.
    #[must_use]
    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    /// Returns the positional parameters, ordered by position.
    #[must_use]
    pub fn positional(&self) -> &[CompiledParam] {
        &self.positional
    }

    /// Returns the named parameters, ordered by name.
    #[must_use]
    pub fn named(&self) -> &[CompiledParam] {
        &self.named
    }

    /// Returns every parameter, positional first.
    pub fn params(&self) -> impl Iterator<Item = &CompiledParam> {
        self.positional.iter().chain(&self.named)
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&CompiledParam> {
        self.params().find(|p| p.name == name)
    }

    /// Returns true if the schema carries the implicit `help` flag.
    #[must_use]
    pub fn has_help(&self) -> bool {
        self.help
    }

    pub(crate) fn types(&self) -> Arc<HashMap<String, ParamType>> {
        Arc::clone(&self.types)
    }

    /// Returns the canonical usage string.
    ///
    /// Positional stubs follow the route as path segments and named stubs
    /// form a query string; required parameters are written `<name>`,
    /// optional ones `[name]`.
    #[must_use]
    pub fn usage(&self) -> String {
        let mut uri = self.route.clone();
        for param in &self.positional {
            uri.push('/');
            uri.push_str(&param.stub());
        }
        if uri.is_empty() {
            uri.push('/');
        }
        if !self.named.is_empty() {
            let stubs: Vec<String> = self.named.iter().map(CompiledParam::stub).collect();
            uri.push('?');
            uri.push_str(&stubs.join("&"));
        }
        uri
    }
}

/// Builder for a [`Schema`].
///
/// # Example
///
/// ```rust
/// use sieve_core::{ParamSpec, ParamType, Schema};
///
/// let schema = Schema::builder("/files")
///     .purpose("list files")
///     .param(ParamSpec::new("dir").position(1))
///     .param(ParamSpec::new("all").of_type(ParamType::Bool))
///     .with_help()
///     .compile()
///     .unwrap();
///
/// assert!(schema.has_help());
/// assert_eq!(schema.usage(), "/files/[dir]?[all]&[help]");
/// ```
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    route: String,
    specs: Vec<ParamSpec>,
    help: bool,
}

impl SchemaBuilder {
    /// Creates a builder for a route.
    #[must_use]
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            specs: Vec::new(),
            help: false,
        }
    }

    /// Sets the purpose text.
    #[must_use]
    pub fn purpose(self, text: impl Into<String>) -> Self {
        self.param(ParamSpec::purpose(text))
    }

    /// Adds a parameter declaration.
    #[must_use]
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Adds several parameter declarations.
    #[must_use]
    pub fn params(mut self, specs: impl IntoIterator<Item = ParamSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Adds the implicit optional `help` flag.
    #[must_use]
    pub fn with_help(mut self) -> Self {
        self.help = true;
        self
    }

    /// Compiles the schema.
    pub fn compile(self) -> Result<Schema, SchemaError> {
        Schema::compile_with(&self.route, self.specs, self.help)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(specs: Vec<ParamSpec>) -> Result<Schema, SchemaError> {
        Schema::compile("/r", specs)
    }

    #[test]
    fn test_split_and_order() {
        let schema = compile(vec![
            ParamSpec::new("zeta"),
            ParamSpec::new("second").position(2),
            ParamSpec::new("alpha"),
            ParamSpec::new("first").position(1),
        ])
        .unwrap();

        let positional: Vec<&str> = schema.positional().iter().map(CompiledParam::name).collect();
        let named: Vec<&str> = schema.named().iter().map(CompiledParam::name).collect();
        assert_eq!(positional, vec!["first", "second"]);
        assert_eq!(named, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_duplicate_name() {
        let err = compile(vec![ParamSpec::new("q"), ParamSpec::new("q").position(1)]).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateName("q".into()));
    }

    #[test]
    fn test_duplicate_position() {
        let err = compile(vec![
            ParamSpec::new("a").position(1),
            ParamSpec::new("b").position(1),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicatePosition { position: 1, .. }));
    }

    #[test]
    fn test_position_gaps_allowed() {
        let schema = compile(vec![
            ParamSpec::new("a").position(1),
            ParamSpec::new("c").position(3),
        ])
        .unwrap();
        assert_eq!(schema.positional().len(), 2);
    }

    #[test]
    fn test_type_normalized() {
        let schema = compile(vec![ParamSpec::new("n").of_type("FLOAT")]).unwrap();
        assert_eq!(schema.param("n").unwrap().param_type(), ParamType::Float);
    }

    #[test]
    fn test_bad_type() {
        let err = compile(vec![ParamSpec::new("n").of_type("number")]).unwrap_err();
        assert_eq!(err, SchemaError::InvalidType("number".into()));
    }

    #[test]
    fn test_default_checked() {
        let err = compile(vec![ParamSpec::new("n").of_type("int").default_value("ten")]).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDefault { expected: ParamType::Int, .. }));

        let err = compile(vec![ParamSpec::new("b").of_type("bool").default_value(1)]).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDefault { .. }));
    }

    #[test]
    fn test_default_zero_values() {
        let schema = compile(vec![
            ParamSpec::new("s"),
            ParamSpec::new("i").of_type("int"),
            ParamSpec::new("f").of_type("float"),
            ParamSpec::new("b").of_type("bool"),
        ])
        .unwrap();

        assert_eq!(schema.param("s").unwrap().default(), &Scalar::String(String::new()));
        assert_eq!(schema.param("i").unwrap().default(), &Scalar::Int(0));
        assert_eq!(schema.param("f").unwrap().default(), &Scalar::Float(0.0));
        assert_eq!(schema.param("b").unwrap().default(), &Scalar::Bool(false));
    }

    #[test]
    fn test_integral_float_default() {
        let schema = compile(vec![ParamSpec::new("f").of_type("float").default_value(2)]).unwrap();
        assert_eq!(schema.param("f").unwrap().default(), &Scalar::Float(2.0));
    }

    #[test]
    fn test_invalid_method() {
        let err = compile(vec![ParamSpec::new("q").methods("GET,FETCH")]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidMethod {
                name: "q".into(),
                method: "FETCH".into(),
            }
        );
    }

    #[test]
    fn test_purpose_slot() {
        let schema = compile(vec![ParamSpec::purpose("does things")]).unwrap();
        assert_eq!(schema.purpose(), "does things");
        assert_eq!(schema.params().count(), 0);

        let err = compile(vec![ParamSpec::purpose("a"), ParamSpec::purpose("b")]).unwrap_err();
        assert_eq!(err, SchemaError::DuplicatePurpose);

        let err = compile(vec![ParamSpec::purpose("a").of_type("int")]).unwrap_err();
        assert_eq!(err, SchemaError::InvalidPurpose);
    }

    #[test]
    fn test_help_collides_with_user_param() {
        let err = Schema::builder("/r")
            .param(ParamSpec::new("help"))
            .with_help()
            .compile()
            .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateName("help".into()));
    }

    #[test]
    fn test_bool_validator_rejected() {
        let err = compile(vec![ParamSpec::new("b").of_type("bool").check(|_| Ok(()))]).unwrap_err();
        assert_eq!(err, SchemaError::BoolValidator("b".into()));
    }

    #[test]
    fn test_route_canonical() {
        assert_eq!(Schema::compile("/a/b/", Vec::new()).unwrap().route(), "/a/b");
        assert_eq!(Schema::compile("/", Vec::new()).unwrap().route(), "");
    }

    #[test]
    fn test_usage() {
        let schema = compile(vec![
            ParamSpec::new("id").position(1).required(),
            ParamSpec::new("page").position(2),
            ParamSpec::new("q").required(),
            ParamSpec::new("debug").of_type("bool"),
        ])
        .unwrap();
        assert_eq!(schema.usage(), "/r/<id>/[page]?[debug]&<q>");
    }

    #[test]
    fn test_usage_root_route() {
        assert_eq!(Schema::compile("/", Vec::new()).unwrap().usage(), "/");
        let schema = Schema::compile("/", vec![ParamSpec::new("x").position(1)]).unwrap();
        assert_eq!(schema.usage(), "/[x]");
    }
}
