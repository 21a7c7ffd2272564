//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{write_error, write_outcome, HINT};
use carpark_app::{Config, Outcome, Session};
use carpark_domain::Clock;
use carpark_types::{OutputFormat, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Options for one run of the command loop
#[derive(Debug, Clone)]
pub struct LoopOptions {
    pub format: OutputFormat,
    /// Printed before each read; `None` for non-interactive input
    pub prompt: Option<String>,
    pub show_hint: bool,
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(fee) = cli.fee_per_hour {
        config.fee_per_hour = fee;
    }
    if let Some(format) = cli.format {
        config.output_format = format;
    }

    match cli.command {
        None => cmd_run(&config, None),
        Some(Commands::Run { script }) => cmd_run(&config, script),
        Some(Commands::Config {
            show,
            set_fee,
            set_output,
            set_prompt,
            set_hint,
            reset,
        }) => cmd_config(show, set_fee, set_output, set_prompt, set_hint, reset),
    }
}

fn cmd_run(config: &Config, script: Option<PathBuf>) -> Result<()> {
    let mut session = Session::new(config.fee_per_hour);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match script {
        Some(path) => {
            info!(path = %path.display(), "running script");
            let input = BufReader::new(File::open(&path)?);
            let options = LoopOptions {
                format: config.output_format,
                prompt: None,
                show_hint: false,
            };
            run_loop(&mut session, input, &mut out, &options)
        }
        None => {
            let stdin = io::stdin();
            let options = LoopOptions {
                format: config.output_format,
                prompt: Some(config.prompt.clone()),
                show_hint: config.show_hint,
            };
            run_loop(&mut session, stdin.lock(), &mut out, &options)
        }
    }
}

/// Read-eval-print loop.
///
/// Command errors are reported and the loop continues; it ends on
/// `exit` or end of input.
pub fn run_loop<C, R, W>(
    session: &mut Session<C>,
    mut input: R,
    out: &mut W,
    options: &LoopOptions,
) -> Result<()>
where
    C: Clock + Clone,
    R: BufRead,
    W: Write,
{
    if options.show_hint && options.format == OutputFormat::Table {
        writeln!(out, "{}", HINT)?;
    }

    let mut buf = Vec::new();
    loop {
        if let Some(ref prompt) = options.prompt {
            write!(out, "{}", prompt)?;
            out.flush()?;
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            debug!("end of input");
            break;
        }
        // Undecodable bytes become U+FFFD instead of ending the session
        let line = String::from_utf8_lossy(&buf);

        match session.execute_line(line.trim()) {
            Ok(None) => continue,
            Ok(Some(Outcome::Exit)) => break,
            Ok(Some(outcome)) => write_outcome(out, options.format, &outcome)?,
            Err(e) => {
                debug!(error = ?e, "command failed");
                write_error(out, options.format, &e)?;
            }
        }
    }

    Ok(())
}

fn cmd_config(
    show: bool,
    set_fee: Option<u64>,
    set_output: Option<OutputFormat>,
    set_prompt: Option<String>,
    set_hint: Option<bool>,
    reset: bool,
) -> Result<()> {
    let mut config = if reset {
        println!("Resetting configuration to defaults");
        Config::default()
    } else {
        Config::load()?
    };

    let mut changed = reset;
    if let Some(fee) = set_fee {
        config.fee_per_hour = fee;
        changed = true;
    }
    if let Some(format) = set_output {
        config.output_format = format;
        changed = true;
    }
    if let Some(prompt) = set_prompt {
        config.prompt = prompt;
        changed = true;
    }
    if let Some(hint) = set_hint {
        config.show_hint = hint;
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Configuration saved.");
    }
    if show || !changed {
        print!("{}", config);
    }
    Ok(())
}
