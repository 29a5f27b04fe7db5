//! Table row splitting.

/// Split a trimmed `| a | b |` line into unescaped, trimmed cells.
///
/// Cells are separated by unescaped pipes. Inside a cell `\|` yields `|`,
/// `\n` a newline and `\\` a backslash; any other escape is kept as written.
/// Text after the last pipe is ignored.
pub(crate) fn split_row(line: &str) -> Option<Vec<String>> {
    let rest = line.strip_prefix('|')?;
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = rest.chars();
    while let Some(c) = chars.next() {
        match c {
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            '\\' => match chars.next() {
                Some('|') => cell.push('|'),
                Some('n') => cell.push('\n'),
                Some('\\') => cell.push('\\'),
                Some(other) => {
                    cell.push('\\');
                    cell.push(other);
                }
                None => cell.push('\\'),
            },
            other => cell.push(other),
        }
    }
    Some(cells)
}
