// ## 📂 File: `src/batch/task.rs`

//! batch/task.rs
//! The unit of work: one input file, the run mode, and the output naming rule.
//!
//! Naming:
//! - encrypt: `<base>`     → `<output_dir>/<base>.enc`
//! - decrypt: `<base>.enc` → `<output_dir>/<base>`; names without the suffix are kept.
//! Only the base name of the input is used; its directory never leaks into the output.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ENC_EXTENSION, ENC_SUFFIX, MODE_DECRYPT, MODE_ENCRYPT};
use crate::telemetry::Stage;
use crate::types::TaskError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Encrypt,
    Decrypt,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Encrypt => MODE_ENCRYPT,
            Mode::Decrypt => MODE_DECRYPT,
        }
    }

    /// Verb used in per-file report lines.
    pub fn past_tense(&self) -> &'static str {
        match self {
            Mode::Encrypt => "Encrypted",
            Mode::Decrypt => "Decrypted",
        }
    }

    pub fn crypto_stage(&self) -> Stage {
        match self {
            Mode::Encrypt => Stage::Encrypt,
            Mode::Decrypt => Stage::Decrypt,
        }
    }

    /// Map an input base name to its output base name.
    pub fn output_file_name(&self, base: &OsStr) -> OsString {
        match self {
            Mode::Encrypt => {
                let mut name = base.to_os_string();
                name.push(ENC_SUFFIX);
                name
            }
            Mode::Decrypt => {
                // Works on the raw OsStr, so non-UTF-8 names are stripped too.
                // A bare ".enc" has no extension and is kept as-is.
                let path = Path::new(base);
                match (path.extension(), path.file_stem()) {
                    (Some(ext), Some(stem)) if ext == OsStr::new(ENC_EXTENSION) => {
                        stem.to_os_string()
                    }
                    _ => base.to_os_string(),
                }
            }
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            MODE_ENCRYPT => Ok(Mode::Encrypt),
            MODE_DECRYPT => Ok(Mode::Decrypt),
            other => Err(TaskError::InvalidMode(other.to_string())),
        }
    }
}

/// Mode as requested by the caller.
///
/// An unsupported mode is not fatal: it travels with every task and each task
/// reports `InvalidMode` when a worker picks it up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedMode {
    Supported(Mode),
    Unsupported(String),
}

impl RequestedMode {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<Mode>() {
            Ok(mode) => RequestedMode::Supported(mode),
            Err(_) => RequestedMode::Unsupported(raw.to_string()),
        }
    }

    pub fn resolve(&self) -> Result<Mode, TaskError> {
        match self {
            RequestedMode::Supported(mode) => Ok(*mode),
            RequestedMode::Unsupported(raw) => Err(TaskError::InvalidMode(raw.clone())),
        }
    }
}

impl From<Mode> for RequestedMode {
    fn from(mode: Mode) -> Self {
        RequestedMode::Supported(mode)
    }
}

impl fmt::Display for RequestedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestedMode::Supported(mode) => write!(f, "{mode}"),
            RequestedMode::Unsupported(raw) => f.write_str(raw),
        }
    }
}

/// One file to process. Created once, consumed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    /// Position in the input list; used to order the final report.
    pub index: usize,
    pub source: PathBuf,
    pub mode: RequestedMode,
}

impl FileTask {
    pub fn new(index: usize, source: impl Into<PathBuf>, mode: RequestedMode) -> Self {
        Self {
            index,
            source: source.into(),
            mode,
        }
    }

    /// Resolve the output path for this task under `output_dir`.
    pub fn output_path(&self, output_dir: &Path) -> Result<PathBuf, TaskError> {
        let mode = self.mode.resolve()?;
        let base = self.source.file_name().ok_or_else(|| TaskError::ReadInput {
            path: self.source.clone(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        })?;
        Ok(output_dir.join(mode.output_file_name(base)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(mode: Mode, base: &str) -> String {
        mode.output_file_name(OsStr::new(base)).to_string_lossy().into_owned()
    }

    #[test]
    fn encrypt_appends_suffix() {
        assert_eq!(name(Mode::Encrypt, "a.txt"), "a.txt.enc");
        assert_eq!(name(Mode::Encrypt, "a.txt.enc"), "a.txt.enc.enc");
    }

    #[test]
    fn decrypt_strips_one_trailing_suffix() {
        assert_eq!(name(Mode::Decrypt, "a.txt.enc"), "a.txt");
        assert_eq!(name(Mode::Decrypt, "a.enc.enc"), "a.enc");
        assert_eq!(name(Mode::Decrypt, "plain"), "plain");
        assert_eq!(name(Mode::Decrypt, "enc"), "enc");
        assert_eq!(name(Mode::Decrypt, ".enc"), ".enc");
    }

    #[cfg(unix)]
    #[test]
    fn decrypt_strips_suffix_from_non_utf8_names() {
        use std::os::unix::ffi::OsStrExt;

        let enc = OsStr::from_bytes(b"r\xffport.txt.enc");
        let plain = OsStr::from_bytes(b"r\xffport.txt");
        assert_eq!(Mode::Decrypt.output_file_name(enc), plain);
        assert_eq!(Mode::Encrypt.output_file_name(plain), enc);
    }

    #[test]
    fn output_path_ignores_input_directory() {
        let task = FileTask::new(0, "/deep/nested/dir/report.pdf", Mode::Encrypt.into());
        let out = task.output_path(Path::new("/out")).unwrap();
        assert_eq!(out, PathBuf::from("/out/report.pdf.enc"));
    }

    #[test]
    fn unsupported_mode_surfaces_on_resolve() {
        let mode = RequestedMode::parse("shred");
        assert_eq!(mode, RequestedMode::Unsupported("shred".into()));
        assert!(matches!(mode.resolve(), Err(TaskError::InvalidMode(m)) if m == "shred"));

        let task = FileTask::new(0, "a.txt", mode);
        assert!(matches!(task.output_path(Path::new("out")), Err(TaskError::InvalidMode(_))));
    }

    #[test]
    fn mode_parse_is_exact() {
        assert_eq!(RequestedMode::parse("encrypt"), RequestedMode::Supported(Mode::Encrypt));
        assert_eq!(RequestedMode::parse("decrypt"), RequestedMode::Supported(Mode::Decrypt));
        assert!(matches!(RequestedMode::parse("Encrypt"), RequestedMode::Unsupported(_)));
    }
}
