//! Forward a question to the external retrieval tool.
//!
//! The tool is invoked directly (no shell) as
//! `<program> <subcommand> --root <index> --method <method> --query <question>`
//! and its output is captured as text.

use crate::config::ToolConfig;
use crate::error::{AssistError, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;
use std::time::Instant;

/// Search mode of the retrieval tool, passed through as `--method`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    /// Reasoning across the whole graph.
    #[default]
    Global,
    /// Deep entity-level search.
    Local,
}

impl SearchMethod {
    pub const ALL: [SearchMethod; 2] = [SearchMethod::Global, SearchMethod::Local];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMethod::Global => "global",
            SearchMethod::Local => "local",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            SearchMethod::Global => "reasoning across graph",
            SearchMethod::Local => "deep entity-level search",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMethod {
    type Err = AssistError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(SearchMethod::Global),
            "local" => Ok(SearchMethod::Local),
            _ => Err(AssistError::InvalidMethod(s.to_string())),
        }
    }
}

/// A question against one document index.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub project_path: PathBuf,
    pub method: SearchMethod,
    pub question: String,
}

impl QueryRequest {
    pub fn new(project_path: &Path, method: SearchMethod, question: impl Into<String>) -> Self {
        Self {
            project_path: project_path.to_path_buf(),
            method,
            question: question.into(),
        }
    }
}

/// What the tool produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Exit status 0; the tool's stdout.
    Answer(String),
    /// Non-zero exit (or killed by a signal); the tool's stderr.
    Failed { code: Option<i32>, stderr: String },
}

impl QueryOutcome {
    pub fn is_answer(&self) -> bool {
        matches!(self, QueryOutcome::Answer(_))
    }
}

/// A validated, ready-to-run tool invocation.
#[derive(Debug, Clone)]
pub struct QueryCommand {
    program: String,
    args: Vec<OsString>,
    method: SearchMethod,
    project_path: PathBuf,
}

impl QueryCommand {
    /// Build the invocation. Blank questions never reach the tool.
    pub fn new(tool: &ToolConfig, request: &QueryRequest) -> Result<Self> {
        if request.question.trim().is_empty() {
            return Err(AssistError::EmptyQuestion);
        }

        let mut args: Vec<OsString> = Vec::with_capacity(7 + tool.extra_args.len());
        args.push(tool.subcommand.clone().into());
        args.push("--root".into());
        args.push(request.project_path.clone().into_os_string());
        args.push("--method".into());
        args.push(request.method.as_str().into());
        args.push("--query".into());
        args.push(request.question.clone().into());
        args.extend(tool.extra_args.iter().map(OsString::from));

        Ok(Self {
            program: tool.program.clone(),
            args,
            method: request.method,
            project_path: request.project_path.clone(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Run the tool to completion and capture its output.
    pub fn run(&self) -> Result<QueryOutcome> {
        let started = Instant::now();
        tracing::info!(
            program = %self.program,
            method = %self.method,
            project = %self.project_path.display(),
            "running query tool"
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AssistError::ToolNotFound(self.program.clone())
                } else {
                    AssistError::ToolSpawn {
                        program: self.program.clone(),
                        source: e,
                    }
                }
            })?;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        if output.status.success() {
            tracing::info!(elapsed_ms, "query tool answered");
            Ok(QueryOutcome::Answer(
                String::from_utf8_lossy(&output.stdout).into_owned(),
            ))
        } else {
            let code = output.status.code();
            tracing::warn!(elapsed_ms, ?code, "query tool failed");
            Ok(QueryOutcome::Failed {
                code,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}
