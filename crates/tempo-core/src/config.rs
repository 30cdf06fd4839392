//! Analyzer configuration management.
//!
//! Provides configuration loading, the global verbose flag, and the optional
//! on-disk override for the chip layout.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Once, OnceLock};

use serde::Deserialize;

use crate::layout::ChipLayout;

// Global verbose flag for controlling debug output
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set the global verbose flag. When true, debug messages will be printed.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

/// Check if verbose mode is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Print a message to stderr only if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if $crate::config::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Canonical list of candidate config file names we search for on disk.
const CONFIG_FILENAMES: &[&str] = &["tempo.yml", "tempo.yaml"];

/// Public handle that stores the loaded configuration, its source path, and warnings.
pub struct ChipConfigHandle {
    pub config: ChipConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl ChipConfigHandle {
    fn with_config(config: ChipConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }
}

/// Complete configuration file structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ChipConfig {
    pub layout: ChipLayout,
}

impl ChipConfig {
    /// Reject layouts that break the fixed-geometry invariants (overlapping
    /// wells would double-count pixels across ROIs).
    fn sanitize(self, warnings: &mut Vec<String>) -> Self {
        match self.layout.validate() {
            Ok(()) => self,
            Err(reason) => {
                warnings.push(format!(
                    "Configured chip layout rejected ({}); using calibrated defaults.",
                    reason
                ));
                Self {
                    layout: ChipLayout::default(),
                }
            }
        }
    }
}

/// Load configuration from disk, optionally forcing a specific path.
pub fn load_chip_config(custom_path: Option<&Path>) -> ChipConfigHandle {
    let mut warnings = Vec::new();
    let candidates = get_config_candidates(custom_path);

    for candidate in candidates {
        if !candidate.exists() || !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match serde_yaml::from_str::<ChipConfig>(&contents) {
                Ok(config) => {
                    let sanitized = config.sanitize(&mut warnings);
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    return ChipConfigHandle::with_config(sanitized, Some(source), warnings);
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse chip config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read chip config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    warnings.push("No chip config found; using built-in calibrated layout.".to_string());
    ChipConfigHandle::with_config(ChipConfig::default(), None, warnings)
}

/// Get list of config file candidates to try
fn get_config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var("TEMPO_CONFIG") {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join("tempo").join(name));
        }
    }

    candidates
}

static CHIP_CONFIG_HANDLE: OnceLock<ChipConfigHandle> = OnceLock::new();
static PRINT_CONFIG_ONCE: Once = Once::new();

/// Access the global chip configuration (loaded once per process).
pub fn chip_config_handle() -> &'static ChipConfigHandle {
    CHIP_CONFIG_HANDLE.get_or_init(|| load_chip_config(None))
}

/// Print config source and warnings the first time it is requested (only in verbose mode).
pub fn log_config_usage() {
    PRINT_CONFIG_ONCE.call_once(|| {
        if !is_verbose() {
            return;
        }
        let handle = chip_config_handle();
        if let Some(source) = &handle.source {
            eprintln!("[tempo] Loaded chip config from {}", source.display());
        } else {
            eprintln!("[tempo] Using built-in chip layout");
        }

        for warning in &handle.warnings {
            eprintln!("[tempo] Config warning: {}", warning);
        }
    });
}
