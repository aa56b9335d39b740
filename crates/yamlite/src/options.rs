#[derive(Debug, Clone)]
pub struct Options {
    /// Report structural problems as [`crate::Error::Syntax`] instead of
    /// building a best-effort tree.
    pub strict: bool,
    /// Indentation columns a leading tab counts for (default: 4)
    pub tab_width: usize,
    /// Indentation step used when writing documents (default: 2 spaces)
    pub indent: usize,
}

impl Options {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strict: false,
            tab_width: 4,
            indent: 2,
        }
    }
}
