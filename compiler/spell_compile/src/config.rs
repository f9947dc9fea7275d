/// Compiler limits.
///
/// The compile cache is built for one configuration; grids compiled under a
/// different configuration need their own cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Maximum total complexity, or `None` for no limit.
    pub max_complexity: Option<u32>,
    /// Maximum repetitions a single `control_repeat` may schedule.
    pub max_repeat: u32,
}

impl CompilerConfig {
    pub const DEFAULT_MAX_REPEAT: u32 = 8;

    #[must_use]
    pub fn with_max_complexity(mut self, limit: u32) -> Self {
        self.max_complexity = Some(limit);
        self
    }

    #[must_use]
    pub fn with_max_repeat(mut self, limit: u32) -> Self {
        self.max_repeat = limit;
        self
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            max_complexity: None,
            max_repeat: Self::DEFAULT_MAX_REPEAT,
        }
    }
}
