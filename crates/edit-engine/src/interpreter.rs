//! Command interpreter implementations.
//!
//! [`ProcessInterpreter`] runs an external program per command: the request
//! is written to its stdin as JSON and an [`InterpretedCommand`] is read
//! back from stdout. The API key, if configured, is passed in the
//! `CUTLINE_API_KEY` environment variable and never on the command line.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use cutline_common::config::InterpreterConfig;
use cutline_common::error::{CutlineError, CutlineResult};

use crate::command::{CommandInterpreter, InterpretRequest, InterpretedCommand};

/// Environment variable carrying the interpreter API key.
pub const API_KEY_ENV: &str = "CUTLINE_API_KEY";

/// Build the interpreter described by `config`.
pub fn from_config(config: &InterpreterConfig) -> Box<dyn CommandInterpreter> {
    match ProcessInterpreter::new(config) {
        Ok(interpreter) => Box::new(interpreter),
        Err(_) => Box::new(UnconfiguredInterpreter),
    }
}

/// Interpreter backed by an external program.
#[derive(Debug, Clone)]
pub struct ProcessInterpreter {
    program: PathBuf,
    args: Vec<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl ProcessInterpreter {
    pub fn new(config: &InterpreterConfig) -> CutlineResult<Self> {
        let program = config
            .program
            .clone()
            .ok_or_else(|| CutlineError::config("interpreter.program is not set"))?;
        Ok(Self {
            program,
            args: config.args.clone(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs.max(1)),
        })
    }

    async fn exchange(&self, payload: &[u8]) -> CutlineResult<std::process::Output> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(key) = &self.api_key {
            command.env(API_KEY_ENV, key);
        }

        let mut child = command.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => CutlineError::FileNotFound {
                path: self.program.clone(),
            },
            _ => CutlineError::Io(e),
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A program that exits without reading its input is reported
            // through its exit status below.
            match stdin.write_all(payload).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(child.wait_with_output().await?)
    }
}

#[async_trait::async_trait]
impl CommandInterpreter for ProcessInterpreter {
    fn name(&self) -> &str {
        "process"
    }

    async fn interpret(&self, request: &InterpretRequest<'_>) -> CutlineResult<InterpretedCommand> {
        let payload = serde_json::to_vec(request)?;

        tracing::debug!(
            program = %self.program.display(),
            bytes = payload.len(),
            "Running interpreter"
        );

        let output = tokio::time::timeout(self.timeout, self.exchange(&payload))
            .await
            .map_err(|_| CutlineError::InterpreterTimeout {
                secs: self.timeout.as_secs(),
            })??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.trim();
            return Err(CutlineError::interpreter(if detail.is_empty() {
                format!("exited with {}", output.status)
            } else {
                format!("exited with {}: {detail}", output.status)
            }));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| CutlineError::interpreter(format!("malformed response: {e}")))
    }
}

/// Placeholder used when no interpreter program is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredInterpreter;

#[async_trait::async_trait]
impl CommandInterpreter for UnconfiguredInterpreter {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn interpret(&self, request: &InterpretRequest<'_>) -> CutlineResult<InterpretedCommand> {
        Err(CutlineError::interpreter(format!(
            "no interpreter configured for \"{}\"; set interpreter.program in the config",
            request.command
        )))
    }
}
