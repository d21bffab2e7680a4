//! Line-by-line script execution.
//!
//! A [`Session`] owns the pipeline and the current source binding for one
//! script run. Each line runs to completion (tokenize, resolve, validate,
//! mutate, and in watch mode render) before the next one is read.

use std::{
    fmt::Display,
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    assets::decode::{SourceBinding, bind},
    filter::engine::{CpuFilterEngine, FilterEngine},
    foundation::error::{ImgshError, ImgshResult},
    pipeline::sequence::Pipeline,
    render::driver::render,
    script::{
        diagnostic::ScriptError,
        registry::{CommandAction, Directive, Registry},
        tokenize::{Line, tokenize},
        validate::validate,
    },
};

/// Run configuration. Watch mode is selected by giving a watch path.
#[derive(Clone, Debug, Default)]
pub struct SessionOpts {
    pub watch: Option<PathBuf>,
}

impl SessionOpts {
    pub fn batch() -> Self {
        Self::default()
    }

    pub fn watch(path: impl Into<PathBuf>) -> Self {
        Self {
            watch: Some(path.into()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No source image yet; operations are still accepted.
    AwaitingBinding,
    Active,
    /// End of input or a fatal error; the session takes no more lines.
    Terminated,
}

/// What a single script line did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// Comment or blank line.
    Skipped,
    /// First field did not resolve in the registry.
    Unknown,
    /// Validated; an operation was appended unless the command is a no-op.
    Accepted,
    /// A known command whose arguments failed validation.
    Rejected,
    Bound,
    Reset,
    Help,
    Shown,
}

impl LineOutcome {
    /// Whether the line resolved to a registered command. Watch mode
    /// renders after every processed line.
    pub fn is_processed(self) -> bool {
        !matches!(self, Self::Skipped | Self::Unknown)
    }
}

/// Counters for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub unknown: usize,
    pub renders: usize,
}

pub struct Session<'r, E: FilterEngine = CpuFilterEngine> {
    registry: &'r Registry,
    engine: E,
    opts: SessionOpts,
    pipeline: Pipeline,
    binding: Option<SourceBinding>,
    state: SessionState,
    summary: RunSummary,
}

impl<'r> Session<'r, CpuFilterEngine> {
    pub fn new(registry: &'r Registry, opts: SessionOpts) -> Self {
        Self::with_engine(registry, CpuFilterEngine::new(), opts)
    }
}

impl<'r, E: FilterEngine> Session<'r, E> {
    pub fn with_engine(registry: &'r Registry, engine: E, opts: SessionOpts) -> Self {
        Self {
            registry,
            engine,
            opts,
            pipeline: Pipeline::new(),
            binding: None,
            state: SessionState::AwaitingBinding,
            summary: RunSummary::default(),
        }
    }

    /// Start with an already decoded source.
    pub fn with_source(mut self, binding: SourceBinding) -> Self {
        self.set_binding(binding);
        self
    }

    /// Bind `path` before the script starts.
    pub fn preload(&mut self, path: &Path) -> ImgshResult<()> {
        let binding = bind(path)?;
        self.set_binding(binding);
        Ok(())
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn binding(&self) -> Option<&SourceBinding> {
        self.binding.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn is_watch(&self) -> bool {
        self.opts.watch.is_some()
    }

    fn set_binding(&mut self, binding: SourceBinding) {
        tracing::info!(
            path = %binding.path.display(),
            format = %binding.format,
            bounds = %binding.bounds(),
            "source bound"
        );
        self.binding = Some(binding);
        self.state = SessionState::Active;
    }

    /// Read `script` to the end.
    ///
    /// Batch mode writes the single final render to `out`; watch mode
    /// overwrites the watch path after every processed line and never
    /// touches `out`. Recoverable problems go to `diag`; the first fatal
    /// error stops the run.
    pub fn run<R: BufRead>(
        &mut self,
        script: R,
        out: &mut dyn Write,
        diag: &mut dyn Write,
    ) -> ImgshResult<RunSummary> {
        let result = self.run_lines(script, out, diag);
        self.state = SessionState::Terminated;
        result.map(|()| self.summary)
    }

    fn run_lines<R: BufRead>(
        &mut self,
        mut script: R,
        out: &mut dyn Write,
        diag: &mut dyn Write,
    ) -> ImgshResult<()> {
        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            if script
                .read_until(b'\n', &mut buf)
                .map_err(ImgshError::Script)?
                == 0
            {
                break;
            }
            line_no += 1;
            let text = String::from_utf8_lossy(strip_newline(&buf));
            self.step(line_no, &text, diag)?;
        }

        if !self.is_watch() {
            self.render_final(out)?;
        }
        Ok(())
    }

    /// Handle one line and, in watch mode, refresh the watch file if the
    /// line was processed.
    pub fn step(
        &mut self,
        line_no: usize,
        text: &str,
        diag: &mut dyn Write,
    ) -> ImgshResult<LineOutcome> {
        let outcome = self.process_line(line_no, text, diag)?;
        if outcome.is_processed() {
            if let Some(path) = self.opts.watch.clone() {
                self.render_watch(&path, diag)?;
            }
        }
        Ok(outcome)
    }

    /// Handle one line without rendering. `line_no` is 1-based.
    pub fn process_line(
        &mut self,
        line_no: usize,
        text: &str,
        diag: &mut dyn Write,
    ) -> ImgshResult<LineOutcome> {
        if self.state == SessionState::Terminated {
            return Err(ImgshError::Other(anyhow::anyhow!(
                "session already terminated"
            )));
        }
        self.summary.lines = line_no;

        let fields = match tokenize(text) {
            Line::Comment | Line::Blank => return Ok(LineOutcome::Skipped),
            Line::Command(fields) => fields,
        };
        let Some((&command, args)) = fields.split_first() else {
            return Ok(LineOutcome::Skipped);
        };
        tracing::debug!(line = line_no, command, "processing");

        let registry = self.registry;
        let Some(spec) = registry.resolve(command) else {
            self.summary.unknown += 1;
            let err = ScriptError::UnknownCommand {
                line: line_no,
                command: command.to_string(),
            };
            report(diag, &err)?;
            return Ok(LineOutcome::Unknown);
        };

        let op = match validate(spec, command, args, line_no) {
            Ok(op) => op,
            Err(e) => {
                self.summary.rejected += 1;
                tracing::debug!(reason = %e.kind, "rejected");
                report(diag, &ScriptError::Invalid(e))?;
                return Ok(LineOutcome::Rejected);
            }
        };
        self.summary.accepted += 1;

        match (spec.action, op) {
            (_, Some(op)) => {
                self.pipeline.append(op);
                Ok(LineOutcome::Accepted)
            }
            (CommandAction::Transform(_), None) => Ok(LineOutcome::Accepted),
            (CommandAction::Directive(d), None) => self.directive(d, args, diag),
        }
    }

    fn directive(
        &mut self,
        directive: Directive,
        args: &[&str],
        diag: &mut dyn Write,
    ) -> ImgshResult<LineOutcome> {
        match directive {
            Directive::Read => {
                let path = args.first().copied().unwrap_or_default();
                let binding = bind(Path::new(path))?;
                self.set_binding(binding);
                Ok(LineOutcome::Bound)
            }
            Directive::Reset => {
                if self.is_watch() {
                    self.pipeline.reset();
                } else {
                    tracing::debug!("reset ignored outside watch mode");
                }
                Ok(LineOutcome::Reset)
            }
            Directive::Help => {
                self.registry
                    .write_help(diag)
                    .context("write command table")?;
                Ok(LineOutcome::Help)
            }
            Directive::Show => {
                for (idx, op) in self.pipeline.iter().enumerate() {
                    writeln!(diag, "{idx}: {op}").context("write pipeline listing")?;
                }
                Ok(LineOutcome::Shown)
            }
        }
    }

    /// Overwrite the watch path with the current render. Bytes are produced
    /// before the file is opened so a failed render leaves it untouched.
    fn render_watch(&mut self, path: &Path, diag: &mut dyn Write) -> ImgshResult<()> {
        let Some(binding) = &self.binding else {
            tracing::debug!("no source bound; skipping watch render");
            return Ok(());
        };
        match render(&self.engine, binding, &self.pipeline) {
            Ok(Some(bytes)) => {
                std::fs::write(path, &bytes)
                    .map_err(|e| ImgshError::sink(path.display().to_string(), e))?;
                self.summary.renders += 1;
                tracing::info!(path = %path.display(), bytes = bytes.len(), "watch file updated");
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) if e.is_recoverable() => report(diag, &e),
            Err(e) => Err(e),
        }
    }

    fn render_final(&mut self, out: &mut dyn Write) -> ImgshResult<()> {
        let binding = self.binding.as_ref().ok_or(ImgshError::MissingSource)?;
        if let Some(bytes) = render(&self.engine, binding, &self.pipeline)? {
            out.write_all(&bytes)
                .and_then(|()| out.flush())
                .map_err(|e| ImgshError::sink("output", e))?;
            self.summary.renders += 1;
        }
        Ok(())
    }
}

fn report(diag: &mut dyn Write, err: &impl Display) -> ImgshResult<()> {
    tracing::warn!("{err}");
    writeln!(diag, "{err}").context("write diagnostic")?;
    Ok(())
}

/// Drop a trailing `\n` or `\r\n`.
fn strip_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;
