//! Indent-aware string builder for Python and YAML generation.
//!
//! Python output uses 4-space indentation, YAML output 2-space.

/// Indent-aware string builder that produces formatted source text.
pub struct CodeWriter {
    buf: String,
    unit: &'static str,
    indent_level: usize,
}

impl CodeWriter {
    /// A writer for Python source.
    pub fn new() -> Self {
        Self::with_indent("    ")
    }

    /// A writer for YAML documents.
    pub fn yaml() -> Self {
        Self::with_indent("  ")
    }

    pub fn with_indent(unit: &'static str) -> Self {
        Self {
            buf: String::with_capacity(4096),
            unit,
            indent_level: 0,
        }
    }

    /// Write a complete line (appends newline).
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.indent_level {
            self.buf.push_str(self.unit);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Write `text:` and increase indent (e.g. `def f(x):`, `metadata:`).
    pub fn block_open(&mut self, text: &str) {
        self.line(&format!("{}:", text));
        self.indent();
    }

    pub fn block_close(&mut self) {
        self.dedent();
    }

    /// Re-indent a multi-line block at the current level. Blank lines stay
    /// empty so no trailing whitespace is produced.
    pub fn embed(&mut self, text: &str) {
        for raw in text.trim_end().lines() {
            let line = raw.trim_end();
            if line.is_empty() {
                self.blank();
            } else {
                self.line(line);
            }
        }
    }

    /// Consume the writer and return the generated string.
    pub fn finish(self) -> String {
        self.buf
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}
