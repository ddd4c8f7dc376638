//! Enrichment through a one-shot child process (`ollama run <model>` or any
//! command that prints a JSON object).

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use regex::Regex;

use crate::enrichment::{build_prompt, Enricher, Enrichment, Language};
use crate::error::{EnrichmentError, PipelineError, Result};

const EXIT_POLL: Duration = Duration::from_millis(10);

/// Runs `program args... <prompt>` per call, bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct ProcessEnricher {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    json_span: Regex,
}

impl ProcessEnricher {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Result<ProcessEnricher> {
        let program = program.into();
        if program.trim().is_empty() {
            return Err(PipelineError::config("enrichment command is empty"));
        }
        // First '{' to last '}', across lines.
        let json_span = Regex::new(r"(?s)\{.*\}").map_err(|e| PipelineError::internal(e.to_string()))?;
        Ok(ProcessEnricher { program, args, timeout, json_span })
    }

    /// Splits a whitespace-separated command line such as
    /// `"ollama run qwen3:4b"`. No shell quoting is interpreted.
    pub fn from_command_line(command: &str, timeout: Duration) -> Result<ProcessEnricher> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_default();
        ProcessEnricher::new(program, parts.collect(), timeout)
    }

    fn spawn(&self, prompt: &str) -> std::result::Result<Child, EnrichmentError> {
        Command::new(&self.program)
            .args(&self.args)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => EnrichmentError::Unavailable,
                _ => EnrichmentError::Failed { code: None, stderr: e.to_string() },
            })
    }

    /// Captured stdout of a successful run. The timeout bounds the whole
    /// call: reading stdout and waiting for the exit status share one deadline.
    fn run(&self, prompt: &str) -> std::result::Result<String, EnrichmentError> {
        let deadline = Instant::now() + self.timeout;
        let mut child = self.spawn(prompt)?;

        let (tx, rx) = mpsc::channel::<Vec<u8>>();
        if let Some(mut stdout) = child.stdout.take() {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = stdout.read_to_end(&mut buf);
                let _ = tx.send(buf);
            });
        }
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = stderr.read_to_end(&mut buf);
                buf
            })
        });

        let stdout = match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(buf) => buf,
            Err(mpsc::RecvTimeoutError::Timeout) => return Err(self.kill(&mut child)),
            Err(mpsc::RecvTimeoutError::Disconnected) => Vec::new(),
        };

        // stdout can close long before the process exits.
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => return Err(self.kill(&mut child)),
                Ok(None) => thread::sleep(EXIT_POLL),
                Err(e) => return Err(EnrichmentError::Failed { code: None, stderr: e.to_string() }),
            }
        };
        if !status.success() {
            let stderr = stderr_reader
                .and_then(|h| h.join().ok())
                .map(|b| String::from_utf8_lossy(&b).trim().to_string())
                .unwrap_or_default();
            return Err(EnrichmentError::Failed { code: status.code(), stderr });
        }
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    fn kill(&self, child: &mut Child) -> EnrichmentError {
        let _ = child.kill();
        let _ = child.wait();
        tracing::warn!(program = %self.program, timeout = ?self.timeout, "enrichment process killed");
        EnrichmentError::Timeout(self.timeout)
    }

    /// Pulls the widest `{...}` span out of free text and reads it as an
    /// object.
    pub fn parse_output(&self, output: &str) -> std::result::Result<Enrichment, EnrichmentError> {
        let span = self
            .json_span
            .find(output)
            .ok_or_else(|| EnrichmentError::Malformed("no JSON object in output".into()))?;
        let value: serde_json::Value =
            serde_json::from_str(span.as_str()).map_err(|e| EnrichmentError::Malformed(e.to_string()))?;
        match value.as_object() {
            Some(obj) => Ok(Enrichment::from_json_object(obj)),
            None => Err(EnrichmentError::Malformed("output is not a JSON object".into())),
        }
    }
}

impl Enricher for ProcessEnricher {
    fn enrich(&self, label: &str, language: Language) -> std::result::Result<Enrichment, EnrichmentError> {
        let prompt = build_prompt(label, language);
        tracing::debug!(program = %self.program, label, "running enrichment");
        let output = self.run(&prompt)?;
        self.parse_output(output.trim())
    }
}
