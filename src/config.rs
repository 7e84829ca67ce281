use std::path::PathBuf;

/// Runtime parameters for one batch pass.
#[derive(Debug, Clone)]
pub struct Config {
    /// Corpus root directory.
    pub root: PathBuf,
    /// Upper bound on the mutation-chain length drawn per file.
    pub max_generations: u32,
    /// Optional size target in kilobytes. `None` or zero keeps the fixed
    /// default-quality encoding.
    pub target_kb: Option<u64>,
    /// Suppress per-file stdout lines and progress output.
    pub quiet: bool,
}

impl Config {
    pub fn new(root: impl Into<PathBuf>, max_generations: u32) -> Self {
        Self {
            root: root.into(),
            max_generations,
            target_kb: None,
            quiet: false,
        }
    }

    /// Size budget in bytes, if a positive kilobyte target was set.
    pub fn budget_bytes(&self) -> Option<u64> {
        self.target_kb.filter(|kb| *kb > 0).map(|kb| kb * 1024)
    }
}
