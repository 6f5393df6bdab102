//! Parsing options and configuration.

/// Options for line classification and section tracking.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// How many characters a line may exceed a trigger phrase by and still
    /// open that section
    pub trigger_margin: usize,

    /// Blank lines allowed between items of the same list
    pub max_list_gap: usize,

    /// Longest line (in characters) accepted as a question heading
    pub max_question_len: usize,

    /// Detect Title Case lines as headings
    pub detect_title_case: bool,

    /// Detect lines ending in `:` as headings
    pub detect_colon_headings: bool,

    /// Detect lines that are wholly bold as headings
    pub detect_bold_headings: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trigger near-match margin.
    pub fn with_trigger_margin(mut self, margin: usize) -> Self {
        self.trigger_margin = margin;
        self
    }

    /// Set the blank-line gap tolerated inside a list.
    pub fn with_max_list_gap(mut self, gap: usize) -> Self {
        self.max_list_gap = gap;
        self
    }

    /// Set the maximum question heading length.
    pub fn with_max_question_len(mut self, len: usize) -> Self {
        self.max_question_len = len;
        self
    }

    /// Enable or disable Title Case heading detection.
    pub fn with_title_case(mut self, detect: bool) -> Self {
        self.detect_title_case = detect;
        self
    }

    /// Enable or disable colon heading detection.
    pub fn with_colon_headings(mut self, detect: bool) -> Self {
        self.detect_colon_headings = detect;
        self
    }

    /// Enable or disable bold heading detection.
    pub fn with_bold_headings(mut self, detect: bool) -> Self {
        self.detect_bold_headings = detect;
        self
    }

    /// Only structural heading forms: bracket tags, triggers, markdown,
    /// numbering, questions and all-caps lines.
    pub fn strict() -> Self {
        Self {
            detect_title_case: false,
            detect_colon_headings: false,
            detect_bold_headings: false,
            ..Self::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trigger_margin: 5,
            max_list_gap: 1,
            max_question_len: 120,
            detect_title_case: true,
            detect_colon_headings: true,
            detect_bold_headings: true,
        }
    }
}
