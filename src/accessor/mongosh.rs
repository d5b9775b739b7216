//! Accessor backed by the `mongosh` shell.
//!
//! Each request spawns `mongosh <uri> --quiet --json=relaxed --eval <expr>`
//! and parses the printed document. Command-level server errors
//! (`MongoServerError`) come back as `{ok: 0, errmsg}` replies so probes can
//! recover from them; anything else (unreachable server, bad credentials,
//! timeouts) is an accessor failure.

use std::time::Duration;

use anyhow::Context;
use serde_json::Value;

use crate::config::Settings;
use crate::error::{PuffinError, Result};
use crate::shell::{execute, CommandOptions};
use crate::snapshot::{Snapshot, SnapshotKind};

use super::{command_name, SearchRequest, SnapshotAccessor};

/// Runs requests through an external `mongosh` process.
#[derive(Debug, Clone)]
pub struct MongoshAccessor {
    program: String,
    uri: String,
    connect_timeout_ms: u64,
    options: CommandOptions,
}

impl MongoshAccessor {
    /// Create an accessor from resolved settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            program: settings.mongosh.clone(),
            uri: settings.uri.clone(),
            connect_timeout_ms: settings.connect_timeout_ms,
            options: CommandOptions {
                timeout: Some(Duration::from_secs(settings.command_timeout_secs)),
            },
        }
    }

    /// The arguments passed to `mongosh` to evaluate `expression`.
    pub fn eval_args(&self, expression: &str) -> Vec<String> {
        vec![
            with_query_param(
                &self.uri,
                "serverSelectionTimeoutMS",
                &self.connect_timeout_ms.to_string(),
            ),
            "--quiet".to_string(),
            "--json=relaxed".to_string(),
            "--eval".to_string(),
            expression.to_string(),
        ]
    }

    /// Evaluate a shell expression and parse its printed result.
    fn eval(&self, operation: &str, expression: &str) -> Result<Value> {
        let result = execute(&self.program, &self.eval_args(expression), &self.options)?;

        if result.timed_out {
            return Err(PuffinError::accessor(
                operation,
                format!("mongosh did not answer within {:?}", result.duration),
            ));
        }
        if !result.success {
            let detail = result.stderr.trim();
            let message = if detail.is_empty() {
                format!("mongosh exited with code {:?}", result.exit_code)
            } else {
                detail.to_string()
            };
            return Err(PuffinError::accessor(operation, message));
        }

        serde_json::from_str(result.stdout.trim())
            .context("unreadable mongosh output")
            .map_err(|e| PuffinError::accessor(operation, format!("{:#}", e)))
    }

    fn command(&self, target: &str, command: &Value) -> Result<Snapshot> {
        let operation = command_name(command).unwrap_or("command").to_string();
        let expression = guarded_command(target, command);
        let reply = self.eval(&operation, &expression)?;
        Ok(Snapshot::new(SnapshotKind::Command, reply))
    }
}

impl SnapshotAccessor for MongoshAccessor {
    fn run_admin_command(&self, command: &Value) -> Result<Snapshot> {
        self.command("db.adminCommand", command)
    }

    fn run_command(&self, command: &Value) -> Result<Snapshot> {
        self.command("db.runCommand", command)
    }

    fn list_collection_names(&self) -> Result<Vec<String>> {
        let reply = self.eval("listCollections", "db.getCollectionNames()")?;
        serde_json::from_value(reply).map_err(|e| {
            PuffinError::accessor("listCollections", format!("unexpected reply: {}", e))
        })
    }

    fn search(&self, request: &SearchRequest) -> Result<Value> {
        let expression = format!(
            "db.getCollection({}).aggregate({}).toArray()",
            Value::String(request.collection.clone()),
            request.pipeline()
        );
        self.eval("search", &expression)
    }

    fn connection_uri(&self) -> Result<String> {
        Ok(self.uri.clone())
    }
}

/// Wrap a command so server-side command errors print as `{ok: 0}` replies.
fn guarded_command(target: &str, command: &Value) -> String {
    format!(
        "(() => {{ try {{ return {}({}); }} catch (e) {{ \
         if (e.name !== 'MongoServerError') throw e; \
         return {{ ok: 0, errmsg: e.message, code: e.code }}; }} }})()",
        target, command
    )
}

/// Append a query parameter to a connection string, unless it already sets it.
///
/// Option names in a connection string are case-insensitive.
fn with_query_param(uri: &str, key: &str, value: &str) -> String {
    if let Some((_, query)) = uri.split_once('?') {
        let present = query.split('&').any(|pair| {
            let name = pair.split_once('=').map(|(name, _)| name).unwrap_or(pair);
            name.eq_ignore_ascii_case(key)
        });
        if present {
            return uri.to_string();
        }
        return format!("{}&{}={}", uri, key, value);
    }
    let after_scheme = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);
    if after_scheme.contains('/') {
        format!("{}?{}={}", uri, key, value)
    } else {
        format!("{}/?{}={}", uri, key, value)
    }
}
