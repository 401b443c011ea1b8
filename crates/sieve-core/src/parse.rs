//! Applying a schema to a request.

use http::Method;
use sieve_extract::{extract, path_segments, ExtractConfig, ExtractedValues, ExtractionContext};

use crate::coerce::coerce;
use crate::schema::CompiledParam;
use crate::{Diagnostic, ParsedArgs, Schema};

impl Schema {
    /// Parses one request.
    ///
    /// Never fails: every problem with the request is recorded as a
    /// [`Diagnostic`] on the returned [`ParsedArgs`]. A body that cannot be
    /// decoded yields a single diagnostic and no parameter is coerced.
    pub fn parse(&self, ctx: &ExtractionContext, config: &ExtractConfig) -> ParsedArgs {
        let segments = path_segments(ctx.path(), self.route());
        let args = match extract(ctx, self.route(), config) {
            Ok(values) => self.resolve(ctx.method(), segments, &values),
            Err(err) => {
                let mut args = ParsedArgs::new(self.route(), segments, self.types());
                args.push(Diagnostic::extraction(&err));
                args
            }
        };

        for diagnostic in args.diagnostics() {
            tracing::debug!(
                route = self.route(),
                param = diagnostic.param(),
                location = %diagnostic.location(),
                "{}",
                diagnostic.message()
            );
        }
        tracing::debug!(
            route = self.route(),
            http.method = %ctx.method(),
            segments = args.arg_count(),
            diagnostics = args.diagnostics().len(),
            "parsed request arguments"
        );

        args
    }

    /// Resolves already-extracted values and path segments.
    ///
    /// Positional parameters are resolved first, then named ones. A
    /// parameter whose method set excludes `method` is skipped entirely.
    pub fn resolve(
        &self,
        method: &Method,
        segments: Vec<String>,
        values: &ExtractedValues,
    ) -> ParsedArgs {
        let mut args = ParsedArgs::new(self.route(), segments, self.types());

        for param in self.positional() {
            if !param.methods().contains(method) {
                continue;
            }
            let index = param.position() as usize - 1;
            let raw: Vec<String> = args.arg(index).map(str::to_string).into_iter().collect();
            apply(&mut args, param, &raw, !raw.is_empty());
        }

        for param in self.named() {
            if !param.methods().contains(method) {
                continue;
            }
            let raw = values.get(param.name()).unwrap_or(&[]);
            apply(&mut args, param, raw, values.contains(param.name()));
        }

        args
    }
}

fn apply(args: &mut ParsedArgs, param: &CompiledParam, raw: &[String], present: bool) {
    if present {
        args.mark_present(param.name());
    }
    match coerce(param, raw) {
        Ok(values) => args.insert(param.name(), values),
        Err(diagnostic) => args.push(diagnostic),
    }
}
