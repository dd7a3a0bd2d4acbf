//! Convert command handler: convert, validate, optionally register.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use humansize::{format_size, BINARY};
use tracing::debug;

use claw_import::cli::ConvertArgs;
use claw_import::registry::{self, RegistryError, SessionEntry};
use claw_import::session::{validate, ValidationError};
use claw_import::{convert, detect, Config, ConvertOptions, ModelRef};

/// Run the default action.
///
/// Fails (non-zero exit) when the input is missing or the written output does
/// not validate. Registration problems are reported but never fail the run.
pub fn handle(args: &ConvertArgs) -> Result<()> {
    let config = Config::load()?;
    let input = args.input.as_deref().context("No input file given")?;

    let session_id = args
        .session_id()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let agent = args.agent.clone().unwrap_or_else(|| config.agent.clone());
    let cwd = args.cwd.clone().unwrap_or_else(|| config.cwd.clone());
    let explicit_output = args.output_path();
    let output = match &explicit_output {
        Some(path) => path.clone(),
        None => registry::sessions_dir(&config.state_dir()?, &agent)
            .join(format!("{session_id}.jsonl")),
    };

    if !input.exists() {
        bail!("input file not found: {}", input.display());
    }

    let input_size = fs::metadata(input)
        .with_context(|| format!("Failed to stat {:?}", input))?
        .len();
    println!("Input:     {} ({})", input.display(), format_size(input_size, BINARY));
    println!("SessionID: {}", session_id);

    if args.dry_run {
        let detection = detect(input, &config.fallback_model)?;
        println!("Model:     {}", detection.model);
        println!("FirstTS:   {}", detection.first_timestamp);
        println!("Output:    {} (dry run, not written)", output.display());
        return Ok(());
    }

    if explicit_output.is_none() {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    let opts = ConvertOptions {
        session_id: session_id.clone(),
        cwd,
        filter_commands: config.filter_commands && !args.no_filter_commands,
        fallback_model: config.fallback_model.clone(),
        default_provider: config.provider.clone(),
    };
    let stats = convert(input, &output, &opts)?;

    let output_size = fs::metadata(&output)
        .with_context(|| format!("Failed to stat {:?}", output))?
        .len();
    println!("Converted: {} messages", stats.converted);
    println!("Skipped:   {} entries", stats.skipped);
    if stats.errors > 0 {
        println!("Errors:    {} parse errors", stats.errors);
    }
    if stats.collisions > 0 {
        println!("Warning:   {} short id collisions", stats.collisions);
    }
    println!("Model:     {}", stats.model.model_id);
    println!("Output:    {} ({})", output.display(), format_size(output_size, BINARY));

    match validate(&output) {
        Ok(count) => println!("Validated: {} valid JSONL lines", count),
        Err(e @ ValidationError::InvalidLine { .. }) => {
            return Err(e).context(format!("Validation failed for {}", output.display()));
        }
        Err(e) => return Err(e.into()),
    }

    if args.register {
        let store = registry::store_path(&config.state_dir()?, &agent);
        register_session(
            &store,
            &agent,
            &session_id,
            &output,
            &stats.model,
            args.label.as_deref(),
        );
    }

    println!("Done.");
    Ok(())
}

/// Best-effort registration; failures are reported, not returned.
fn register_session(
    store: &Path,
    agent: &str,
    session_id: &str,
    output: &Path,
    model: &ModelRef,
    label: Option<&str>,
) {
    let session_file = absolute(output);
    let entry = SessionEntry::new(session_id, &session_file, model, label);

    match registry::register(store, agent, &entry) {
        Ok(registered) => {
            println!(
                "  Registered as '{}' in {}",
                registered.key,
                registered.store_path.display()
            );
        }
        Err(e @ RegistryError::NotFound { .. }) => {
            debug!(error = %e, "registration skipped");
            eprintln!("  WARN: {}", e);
        }
        Err(e) => {
            debug!(error = %e, "registration failed");
            eprintln!("  ERROR: {}", e);
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
