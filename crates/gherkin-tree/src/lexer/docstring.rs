//! Doc string delimiters and content normalisation.

const DELIMITERS: [&str; 2] = ["\"\"\"", "```"];

/// An open doc string awaiting its closing delimiter.
#[derive(Debug)]
pub(crate) struct OpenDocString {
    delimiter: &'static str,
    escaped: String,
    indent: usize,
    pub(crate) line: usize,
}

impl OpenDocString {
    /// Recognise an opening delimiter on `source`.
    ///
    /// Returns the open doc string and the media type written after the
    /// delimiter, if any.
    pub(crate) fn open(source: &str, line: usize) -> Option<(Self, Option<String>)> {
        let trimmed = source.trim_start();
        let delimiter = DELIMITERS
            .into_iter()
            .find(|delimiter| trimmed.starts_with(delimiter))?;
        let media_type = trimmed
            .strip_prefix(delimiter)
            .map(str::trim)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string);
        let indent = source.chars().take_while(|c| c.is_whitespace()).count();
        let escaped = delimiter.chars().flat_map(|c| ['\\', c]).collect();
        Some((
            Self {
                delimiter,
                escaped,
                indent,
                line,
            },
            media_type,
        ))
    }

    /// Return `true` when `source` closes this doc string.
    pub(crate) fn is_closed_by(&self, source: &str) -> bool {
        source.trim() == self.delimiter
    }

    /// Strip up to the opening indentation and unescape delimiters.
    pub(crate) fn content(&self, source: &str) -> String {
        let offset = source
            .char_indices()
            .take(self.indent)
            .find(|(_, c)| !c.is_whitespace())
            .or_else(|| source.char_indices().nth(self.indent))
            .map_or(source.len(), |(offset, _)| offset);
        source
            .get(offset..)
            .unwrap_or_default()
            .replace(&self.escaped, self.delimiter)
    }
}
