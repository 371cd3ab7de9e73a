//! Configuration for parsing.

/// Configuration for the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseConfig {
    /// Keywords that introduce a two-token `keyword name = { ... }` header.
    pub scripted_keywords: Vec<String>,

    /// Maximum nesting of blocks and values before the parse is abandoned.
    pub max_depth: usize,

    /// Report an empty-file warning for input with no statements.
    pub report_empty_file: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            scripted_keywords: vec!["scripted_trigger".into(), "scripted_effect".into()],
            max_depth: 256,
            report_empty_file: true,
        }
    }
}

impl ParseConfig {
    /// Returns true if `word` starts a scripted statement.
    #[must_use]
    pub fn is_scripted_keyword(&self, word: &str) -> bool {
        self.scripted_keywords.iter().any(|k| k == word)
    }

    /// Builder method to replace the scripted-statement keywords.
    #[must_use]
    pub fn with_scripted_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scripted_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to set the nesting limit.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Builder method to enable/disable the empty-file warning.
    #[must_use]
    pub fn with_report_empty_file(mut self, report: bool) -> Self {
        self.report_empty_file = report;
        self
    }
}
