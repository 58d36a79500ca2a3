/// Line/column position, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    pub line: usize,
    /// Byte distance from the start of the line, plus one.
    pub column: usize,
}

/// Byte offsets of every `\n` in a text, used to map offsets to positions.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    pub fn build(text: &str) -> Self {
        Self {
            newlines: memchr::memchr_iter(b'\n', text.as_bytes()).collect(),
        }
    }

    /// Number of lines, counting a trailing empty line after a final `\n`.
    pub fn line_count(&self) -> usize {
        self.newlines.len() + 1
    }

    /// Offset where the given 1-based line begins.
    pub fn line_start(&self, line: usize) -> usize {
        match line {
            0 | 1 => 0,
            n => self.newlines.get(n - 2).map_or(0, |nl| nl + 1),
        }
    }

    /// Maps a byte offset to its line and byte column.
    ///
    /// An offset sitting on a `\n` belongs to the line that newline terminates.
    pub fn locate(&self, offset: usize) -> LineCol {
        let line = 1 + self.newlines.partition_point(|&nl| nl < offset);
        LineCol {
            line,
            column: offset - self.line_start(line) + 1,
        }
    }

    /// Like [`locate`](Self::locate), but the column counts characters instead of bytes.
    ///
    /// `offset` must lie on a char boundary of `text`, the text the index was built from.
    pub fn locate_chars(&self, text: &str, offset: usize) -> LineCol {
        let LineCol { line, .. } = self.locate(offset);
        let start = self.line_start(line);
        let column = text.get(start..offset).map_or(offset - start, |s| s.chars().count()) + 1;
        LineCol { line, column }
    }
}
