//! filecrypt
//!
//! Command-line front end over filecrypt-core.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use filecrypt_core::batch::{run_batch_dir, BatchConfig, BatchReport, WorkerProfile};
use filecrypt_core::crypto::{CipherSuite, SecretKey};
use filecrypt_core::types::ConfigError;

/// Exit status for configuration errors (nothing was processed).
const EXIT_CONFIG: u8 = 2;

/// Exit status once the run completed, per-file errors included.
const EXIT_OK: u8 = 0;

#[derive(Parser)]
#[command(name = "filecrypt")]
#[command(about = "Encrypt or decrypt every file in a directory, in parallel")]
#[command(version)]
struct Cli {
    /// Input directory containing files to process
    #[arg(long = "in", value_name = "DIR")]
    input: Option<PathBuf>,

    /// Output directory for processed files
    #[arg(long = "out", value_name = "DIR")]
    output: Option<PathBuf>,

    /// 32-byte key as 64 hex characters
    #[arg(long, env = "FILECRYPT_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Mode: 'encrypt' or 'decrypt'
    #[arg(long, default_value = "encrypt")]
    mode: String,

    /// Worker threads (default: one per CPU)
    #[arg(long)]
    workers: Option<usize>,

    /// AEAD cipher suite: aes-256-gcm or chacha20-poly1305
    #[arg(long, default_value = "aes-256-gcm")]
    cipher: CipherSuite,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli, &mut io::stdout().lock()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "filecrypt_core=debug" } else { "filecrypt_core=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Runs one batch and writes the report to `out`. Returns the exit status.
fn run(cli: Cli, out: &mut impl Write) -> Result<u8> {
    let (Some(input), Some(output), Some(key)) = (cli.input, cli.output, cli.key) else {
        writeln!(out, "{}", Cli::command().render_usage())?;
        return Ok(EXIT_CONFIG);
    };

    let key = match SecretKey::from_hex(&key) {
        Ok(key) => key,
        Err(e @ (ConfigError::InvalidKeyLen { .. } | ConfigError::InvalidKeyEncoding(_))) => {
            writeln!(out, "Invalid key. Must be 32 bytes (64 hex characters). ({e})")?;
            return Ok(EXIT_CONFIG);
        }
        Err(e) => return Err(e).context("reading key"),
    };

    debug!(
        "[CLI] input={} output={} mode={} cipher={}",
        input.display(),
        output.display(),
        cli.mode,
        cli.cipher
    );

    let profile = match cli.workers {
        Some(n) => WorkerProfile::fixed(n),
        None => WorkerProfile::dynamic(),
    };
    let config = BatchConfig::new(key, output, cli.mode)
        .with_profile(profile)
        .with_suite(cli.cipher);

    let report = match run_batch_dir(&input, &config) {
        Ok(report) => report,
        Err(e) => {
            writeln!(out, "Error: {e}")?;
            return Ok(EXIT_CONFIG);
        }
    };

    if cli.json {
        let json = report.to_json().context("serializing report")?;
        writeln!(out, "{json}")?;
    } else {
        write_report(&report, out)?;
    }

    Ok(EXIT_OK)
}

fn write_report(report: &BatchReport, out: &mut impl Write) -> io::Result<()> {
    for result in &report.results {
        writeln!(out, "{result}")?;
    }
    if !report.is_clean() {
        writeln!(
            out,
            "{} of {} files failed",
            report.failure_count(),
            report.results.len()
        )?;
    }
    writeln!(out, "{}", report.completion_line())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    fn run_args(args: &[&str]) -> (u8, String) {
        let cli = Cli::try_parse_from(std::iter::once("filecrypt").chain(args.iter().copied()))
            .expect("arguments parse");
        let mut out = Vec::new();
        let code = run(cli, &mut out).expect("run");
        (code, String::from_utf8(out).expect("utf-8 output"))
    }

    #[test]
    fn missing_arguments_print_usage() {
        let (code, out) = run_args(&["--in", "somewhere"]);
        assert_eq!(code, EXIT_CONFIG);
        assert!(out.starts_with("Usage: filecrypt"), "{out}");
    }

    #[test]
    fn short_key_is_rejected_before_any_io() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("out");
        let short = &KEY_HEX[..62];

        let (code, out) = run_args(&[
            "--in",
            tmp.path().join("missing").to_str().unwrap(),
            "--out",
            out_dir.to_str().unwrap(),
            "--key",
            short,
        ]);

        assert_eq!(code, EXIT_CONFIG);
        assert!(out.starts_with("Invalid key. Must be 32 bytes"), "{out}");
        assert!(!out_dir.exists());
    }

    #[test]
    fn encrypt_run_ends_with_completion_line() {
        let tmp = tempfile::tempdir().unwrap();
        let in_dir = tmp.path().join("in");
        let out_dir = tmp.path().join("out");
        fs::create_dir(&in_dir).unwrap();
        fs::create_dir(&out_dir).unwrap();
        fs::write(in_dir.join("a.txt"), b"alpha").unwrap();
        fs::write(in_dir.join("b.txt"), b"bravo").unwrap();

        let (code, out) = run_args(&[
            "--in",
            in_dir.to_str().unwrap(),
            "--out",
            out_dir.to_str().unwrap(),
            "--key",
            KEY_HEX,
            "--workers",
            "2",
        ]);

        assert_eq!(code, EXIT_OK);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3, "{out}");
        assert!(lines[0].starts_with("Encrypted "), "{out}");
        assert_eq!(lines[2], "encrypt complete!");
        assert!(out_dir.join("a.txt.enc").is_file());
        assert!(out_dir.join("b.txt.enc").is_file());
    }
}
