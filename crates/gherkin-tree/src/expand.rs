//! Scenario outline expansion.
//!
//! Every data row of every example table yields one [`ExampleNode`] whose
//! steps are the outline's template steps with `<placeholder>` tokens
//! replaced by the row's cells. Substitution reaches into table cells and
//! doc string lines as well as the step text.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

use crate::node::{ExampleNode, ExampleTableNode, KeywordNode, StepNode, TaggedNode, Tags};

/// Matches `<placeholder>` tokens, capturing the name without brackets.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([^<>]+)>").unwrap_or_else(|_| unreachable!("placeholder regex is valid"))
});

/// Expand an outline into one example per data row.
///
/// Tables are visited in order and rows top to bottom; the returned index is
/// 1-based and keeps counting across tables. Each example's tags are the
/// outline's `tags` followed by those of its own table.
///
/// # Examples
///
/// ```
/// use gherkin_tree::{ExampleTableNode, StepNode, TableNode, Tags, expand_outline};
/// use gherkin_tree::ScenarioLike;
/// use gherkin_tree_keywords::StepKeyword;
///
/// let steps = vec![StepNode::new("Given", StepKeyword::Given, "I am <name>", 2)];
/// let table = TableNode::new([
///     (4, vec!["name".to_string(), "email".to_string()]),
///     (5, vec!["everzet".to_string(), "ever.zet@gmail.com".to_string()]),
/// ])
/// .unwrap();
/// let tables = [ExampleTableNode::new(table, "Examples")];
/// let examples = expand_outline(None, &Tags::new(), &steps, &tables);
/// assert_eq!(examples[0].steps()[0].text(), "I am everzet");
/// ```
#[must_use]
pub fn expand_outline(
    title: Option<&str>,
    tags: &Tags,
    steps: &[StepNode],
    tables: &[ExampleTableNode],
) -> Vec<ExampleNode> {
    let mut examples = Vec::new();
    for table in tables {
        let mut rows = table.entries();
        let Some((_, header)) = rows.next() else {
            continue;
        };
        let row_tags = tags.union(table.tags());
        for (line, cells) in rows {
            let tokens: IndexMap<String, String> =
                header.iter().cloned().zip(cells.iter().cloned()).collect();
            let concrete = steps
                .iter()
                .map(|step| step.map_text(|text| substitute(text, &tokens)))
                .collect();
            let index = examples.len() + 1;
            examples.push(ExampleNode::new(
                table.render_row(cells),
                row_tags.clone(),
                concrete,
                tokens,
                table.keyword(),
                line,
                title.map(str::to_string),
                index,
            ));
        }
    }
    examples
}

/// Replace each `<key>` in `text` with `tokens[key]`.
///
/// Unknown keys stay as literal text. Substituted values are not scanned
/// again, so a value that itself looks like `<other>` is kept verbatim.
#[must_use]
pub fn substitute(text: &str, tokens: &IndexMap<String, String>) -> String {
    if tokens.is_empty() {
        return text.to_string();
    }
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            caps.get(1)
                .and_then(|name| tokens.get(name.as_str()))
                .map_or_else(|| whole.to_string(), Clone::clone)
        })
        .into_owned()
}
