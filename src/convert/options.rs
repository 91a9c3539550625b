//! Conversion options and configuration.

/// Options for converting a PDF into a document.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether to emit per-page size and vertices records
    pub geometry: bool,

    /// Whether to extract pages in parallel
    pub parallel: bool,
}

impl ConvertOptions {
    /// Create new conversion options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (keep going past unreadable pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable geometry output.
    pub fn with_geometry(mut self, geometry: bool) -> Self {
        self.geometry = geometry;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            geometry: false,
            parallel: true,
        }
    }
}

/// Error handling mode for per-page failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first unreadable page
    #[default]
    Strict,
    /// Log the failure and keep an empty page in its place
    Lenient,
}
