//! CLI command implementations
//!
//! `check` turns every input line into an instance of the named schema,
//! validates it and writes either the built record or every field error.
//! A bad line produces an error response; it never stops the run.

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};

use crate::model::ModelValidationError;
use crate::observability::{log_event, Event, Logger, MetricsRegistry};
use crate::rule::Rule;
use crate::schema::{LoadedSchema, SchemaLoader};

use super::args::{Command, CommonArgs};
use super::config::Config;
use super::errors::CliResult;
use super::io::{read_requests, write_error, write_response};

/// Dispatches a parsed command.
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Check { schema, common } => check(&schema, &common),
        Command::Schemas { common } => schemas(&common),
    }
}

/// Resolves configuration and loads every schema document.
pub fn load_schemas(common: &CommonArgs) -> CliResult<SchemaLoader> {
    let config = Config::resolve(common.config.as_deref())?;
    Logger::set_min_severity(config.severity()?);

    let schema_dir = common.schema_dir.clone().unwrap_or(config.schema_dir);
    let dir_display = schema_dir.display().to_string();
    log_event(Event::ConfigLoaded, &[("schema_dir", &dir_display)]);

    let mut loader = SchemaLoader::new(&schema_dir);
    match loader.load_all() {
        Ok(count) => {
            log_event(Event::SchemasLoaded, &[("count", &count.to_string())]);
            Ok(loader)
        }
        Err(e) => {
            log_event(Event::SchemaLoadFailed, &[("error", e.message())]);
            Err(e.into())
        }
    }
}

/// `check`: validate stdin against one schema.
pub fn check(schema: &str, common: &CommonArgs) -> CliResult<()> {
    let loader = load_schemas(common)?;
    let loaded = loader.require(schema)?;
    let metrics = MetricsRegistry::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    check_stream(loaded, stdin.lock(), &mut stdout, &metrics)?;

    let snapshot = metrics.snapshot();
    log_event(
        Event::CommandComplete,
        &[
            ("schema", schema),
            ("passed", &snapshot.validations_passed.to_string()),
            ("failed", &snapshot.validations_failed.to_string()),
            ("rejected", &snapshot.inputs_rejected.to_string()),
        ],
    );
    Ok(())
}

/// Validates each JSON line of `reader`, writing one response per line.
pub fn check_stream<R: BufRead, W: Write>(
    loaded: &LoadedSchema,
    reader: R,
    writer: &mut W,
    metrics: &MetricsRegistry,
) -> CliResult<()> {
    for request in read_requests(reader) {
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                metrics.increment_inputs_rejected();
                Logger::warn(Event::InputRejected, &[("error", e.message())]);
                write_error(writer, e.code_str(), e.message(), None)?;
                continue;
            }
        };
        check_one(loaded, &request, writer, metrics)?;
    }
    Ok(())
}

fn check_one<W: Write>(
    loaded: &LoadedSchema,
    request: &Value,
    writer: &mut W,
    metrics: &MetricsRegistry,
) -> CliResult<()> {
    let mut instance = match loaded.instance_from_json(request) {
        Ok(instance) => instance,
        Err(e) => {
            metrics.increment_inputs_rejected();
            Logger::warn(Event::InputRejected, &[("error", e.message())]);
            return write_error(writer, e.code().code(), e.message(), None);
        }
    };

    Logger::trace(Event::ValidationBegin, &[("schema", loaded.name())]);
    let record = match instance.validate() {
        Ok(valid) => valid.build(),
        Err(err) => {
            report_failure(&err, metrics);
            let errors = serde_json::to_value(err.field_errors())?;
            return write_error(writer, err.code(), &err.to_string(), Some(errors));
        }
    };

    let record = record?;
    metrics.increment_validations_passed();
    metrics.increment_records_built();
    Logger::info(Event::ValidationPassed, &[("schema", loaded.name())]);
    Logger::trace(Event::RecordBuilt, &[("fields", &record.len().to_string())]);
    write_response(writer, &record)
}

fn report_failure(err: &ModelValidationError, metrics: &MetricsRegistry) {
    metrics.record_validation_failure(err.len());
    Logger::info(
        Event::ValidationFailed,
        &[("schema", err.schema()), ("fields", &err.len().to_string())],
    );
    for (field, messages) in err.field_errors().iter() {
        Logger::trace(
            Event::FieldRejected,
            &[("field", field), ("messages", &messages.join("; "))],
        );
    }
}

/// `schemas`: list loaded schemas with their fields and rules.
pub fn schemas(common: &CommonArgs) -> CliResult<()> {
    let loader = load_schemas(common)?;
    let mut stdout = io::stdout();
    write_response(&mut stdout, &describe_schemas(&loader))
}

/// JSON description of every loaded schema.
pub fn describe_schemas(loader: &SchemaLoader) -> Value {
    let schemas: Vec<Value> = loader
        .all_schemas()
        .map(|loaded| {
            let fields: Vec<Value> = loaded
                .document()
                .fields
                .iter()
                .map(|field| {
                    let rules: Vec<&str> = loaded
                        .schema()
                        .field(&field.name)
                        .map(|v| v.rules().iter().map(Rule::name).collect())
                        .unwrap_or_default();
                    json!({
                        "name": field.name,
                        "kind": field.spec.kind().name(),
                        "rules": rules,
                    })
                })
                .collect();
            json!({
                "name": loaded.name(),
                "description": loaded.document().description,
                "fields": fields,
            })
        })
        .collect();
    Value::Array(schemas)
}
