//! Step inputs/outputs exchanged with the Actions runner.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Destination of step outputs.
///
/// Writes `name<<DELIM` heredoc blocks to the file named by `GITHUB_OUTPUT`,
/// or to stdout when running outside the runner.
#[derive(Debug, Clone, Default)]
pub struct StepOutputs {
    file: Option<PathBuf>,
}

impl StepOutputs {
    pub fn from_env() -> Self {
        Self {
            file: std::env::var_os("GITHUB_OUTPUT")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
        }
    }

    pub fn stdout() -> Self {
        Self { file: None }
    }

    pub fn set(&self, name: &str, value: &str) -> crate::Result<()> {
        let block = output_block(name, value);
        match &self.file {
            Some(path) => {
                let mut file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| crate::Error::Write {
                        path: path.clone(),
                        source: e,
                    })?;
                file.write_all(block.as_bytes())
                    .map_err(|e| crate::Error::Write {
                        path: path.clone(),
                        source: e,
                    })
            }
            None => {
                print!("{block}");
                Ok(())
            }
        }
    }

    /// Run `f` inside a collapsible log group.
    pub fn group<T>(title: &str, f: impl FnOnce() -> T) -> T {
        println!("::group::{title}");
        let out = f();
        println!("::endgroup::");
        out
    }
}

fn output_block(name: &str, value: &str) -> String {
    let mut delimiter = "ghadelimiter".to_owned();
    let mut n = 0u32;
    while value.contains(&delimiter) {
        n += 1;
        delimiter = format!("ghadelimiter_{n}");
    }
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

/// Sink for values the runner must redact from logs.
pub trait SecretMasker {
    fn mask(&self, value: &str);
}

/// Emits `::add-mask::` workflow commands, one per line of the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionsMasker;

impl SecretMasker for ActionsMasker {
    fn mask(&self, value: &str) {
        for line in value.lines().filter(|l| !l.trim().is_empty()) {
            println!("::add-mask::{line}");
        }
    }
}

/// Collects masked values in memory.
#[derive(Debug, Default)]
pub struct RecordingMasker {
    masked: Mutex<Vec<String>>,
}

impl RecordingMasker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked(&self) -> Vec<String> {
        match self.masked.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.masked().iter().any(|m| m == value)
    }
}

impl SecretMasker for RecordingMasker {
    fn mask(&self, value: &str) {
        match self.masked.lock() {
            Ok(mut guard) => guard.push(value.to_owned()),
            Err(poisoned) => poisoned.into_inner().push(value.to_owned()),
        }
    }
}
