//! Layout search parameters

/// Parameters for the layout search
///
/// Defaults match a "generate" request: a 25×25 working grid, 200 trials and
/// at least 12 placed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Side length of the working grid before trimming
    pub grid_size: usize,
    /// Number of independent trials
    pub trials: usize,
    /// Minimum number of placed answers for a trial to count
    pub min_words: usize,
    /// Base seed; `None` draws a fresh one per search
    pub seed: Option<u64>,
}

impl LayoutConfig {
    pub const DEFAULT_GRID_SIZE: usize = 25;
    pub const DEFAULT_TRIALS: usize = 200;
    pub const DEFAULT_MIN_WORDS: usize = 12;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            grid_size: Self::DEFAULT_GRID_SIZE,
            trials: Self::DEFAULT_TRIALS,
            min_words: Self::DEFAULT_MIN_WORDS,
            seed: None,
        }
    }

    #[must_use]
    pub const fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    #[must_use]
    pub const fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    #[must_use]
    pub const fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}
