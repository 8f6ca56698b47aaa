/// Line buffer with an explicit indentation level, four spaces per level.
#[derive(Debug, Default)]
pub struct CodeWriter {
    lines:        Vec<String>,
    indent_level: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn unindent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Appends `line` at the current level. Empty input yields an empty line
    /// without trailing whitespace.
    pub fn line(&mut self, line: &str) {
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", "    ".repeat(self.indent_level), line));
        }
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Appends pre-formatted text verbatim, ignoring the indentation level.
    pub fn raw(&mut self, text: &str) {
        self.lines.extend(text.lines().map(str::to_string));
    }

    /// Emits `header`, runs `body` one level deeper, then emits `footer`.
    pub fn block<F>(&mut self, header: &str, footer: &str, body: F)
    where
        F: FnOnce(&mut CodeWriter),
    {
        self.line(header);
        self.indent();
        body(self);
        self.unindent();
        self.line(footer);
    }

    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
