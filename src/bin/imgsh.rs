use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context as _;
use clap::Parser;
use imgsh::{ExitOutcome, Registry, Session, SessionOpts};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "imgsh", version, about = "Line-oriented image processing shell")]
struct Cli {
    /// Script file (default: stdin).
    #[arg(short = 'c', long = "script")]
    script: Option<PathBuf>,

    /// Output file for the final image (default: stdout).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Source image to bind before the script starts.
    #[arg(short = 'f', long = "source")]
    source: Option<PathBuf>,

    /// Watch mode: rewrite this file after every processed line.
    #[arg(short = 'w', long = "watch")]
    watch: Option<PathBuf>,

    /// Write the final pipeline as JSON.
    #[arg(long)]
    dump_pipeline: Option<PathBuf>,

    /// Print the command table and exit.
    #[arg(long)]
    commands: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    run(&cli).into()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(outcome: ExitOutcome, err: impl std::fmt::Display) -> ExitOutcome {
    eprintln!("imgsh: {err}");
    outcome
}

fn run(cli: &Cli) -> ExitOutcome {
    let registry = Registry::standard();
    let mut diag = std::io::stderr().lock();

    if cli.commands {
        if let Err(e) = registry.write_help(&mut diag) {
            return fail(ExitOutcome::Failure, e);
        }
        return ExitOutcome::Usage;
    }

    let script: Box<dyn BufRead> = match &cli.script {
        Some(path) => match File::open(path) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(e) => {
                return fail(
                    ExitOutcome::ScriptOpen,
                    format!("open script '{}': {e}", path.display()),
                );
            }
        },
        None => Box::new(std::io::stdin().lock()),
    };

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => match File::create(path) {
            Ok(f) => Box::new(BufWriter::new(f)),
            Err(e) => {
                return fail(
                    ExitOutcome::OutputOpen,
                    format!("create output '{}': {e}", path.display()),
                );
            }
        },
        None => Box::new(std::io::stdout().lock()),
    };

    let opts = SessionOpts {
        watch: cli.watch.clone(),
    };
    let mut session = Session::new(&registry, opts);
    if let Some(path) = &cli.source {
        if let Err(e) = session.preload(path) {
            return fail(ExitOutcome::from_error(&e), e);
        }
    }

    let summary = match session.run(script, &mut out, &mut diag) {
        Ok(summary) => summary,
        Err(e) => return fail(ExitOutcome::from_error(&e), e),
    };
    tracing::info!(
        lines = summary.lines,
        accepted = summary.accepted,
        rejected = summary.rejected,
        unknown = summary.unknown,
        renders = summary.renders,
        "script finished"
    );

    if let Some(path) = &cli.dump_pipeline {
        let written = session.pipeline().to_json().and_then(|json| {
            std::fs::write(path, json)
                .with_context(|| format!("write pipeline '{}'", path.display()))
        });
        if let Err(e) = written {
            return fail(ExitOutcome::Failure, format!("{e:#}"));
        }
    }

    ExitOutcome::Success
}
