//! Configuration for batch checking.

use std::num::NonZeroUsize;
use std::thread;

use pdxscript_extract::ExtractConfig;
use pdxscript_language::ParseConfig;

/// Configuration for checking many files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckConfig {
    /// Number of worker threads.
    pub jobs: usize,

    /// Parser settings.
    pub parse: ParseConfig,

    /// Extraction settings.
    pub extract: ExtractConfig,

    /// Print warnings as well as errors.
    pub show_warnings: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            jobs: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            parse: ParseConfig::default(),
            extract: ExtractConfig::default(),
            show_warnings: true,
        }
    }
}

impl CheckConfig {
    /// Builder method to set the worker count. Zero is treated as one.
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Builder method to replace the parser settings.
    #[must_use]
    pub fn with_parse(mut self, parse: ParseConfig) -> Self {
        self.parse = parse;
        self
    }

    /// Builder method to replace the extraction settings.
    #[must_use]
    pub fn with_extract(mut self, extract: ExtractConfig) -> Self {
        self.extract = extract;
        self
    }

    /// Builder method to show or hide warnings.
    #[must_use]
    pub fn with_show_warnings(mut self, show: bool) -> Self {
        self.show_warnings = show;
        self
    }
}
