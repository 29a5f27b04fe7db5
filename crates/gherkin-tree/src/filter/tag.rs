//! Tag expressions in conjunctive form.
//!
//! `&&` separates clauses that must all hold; inside a clause `,` separates
//! alternatives of which one must hold. A leading `~` negates a tag and the
//! `@` marker is optional. An empty expression matches everything.

use std::fmt;

use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
struct TagTerm {
    name: String,
    negated: bool,
}

impl TagTerm {
    fn holds(&self, tags: &[&str]) -> bool {
        tags.contains(&self.name.as_str()) != self.negated
    }
}

/// Parsed tag expression such as `@wip,@vip&&~@slow`.
///
/// # Examples
///
/// ```
/// use gherkin_tree::TagExpression;
///
/// let expression = TagExpression::parse("@wip,@vip&&@user");
/// assert!(expression.matches(["vip", "user"]));
/// assert!(!expression.matches(["wip"]));
/// assert!(TagExpression::parse("").matches([]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagExpression {
    clauses: Vec<Vec<TagTerm>>,
}

impl TagExpression {
    /// Parse `expression`; empty alternatives and clauses are ignored.
    ///
    /// Whitespace inside a tag name is accepted but deprecated and logged.
    #[must_use]
    pub fn parse(expression: &str) -> Self {
        let clauses = expression
            .split("&&")
            .map(|clause| clause.split(',').filter_map(parse_term).collect::<Vec<_>>())
            .filter(|clause| !clause.is_empty())
            .collect();
        Self { clauses }
    }

    /// Return `true` when the expression has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate the expression against a set of tag names without `@`.
    pub fn matches<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tags: Vec<&str> = tags.into_iter().collect();
        self.clauses
            .iter()
            .all(|clause| clause.iter().any(|term| term.holds(&tags)))
    }
}

impl fmt::Display for TagExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = self
            .clauses
            .iter()
            .map(|clause| {
                clause
                    .iter()
                    .map(|term| format!("{}@{}", if term.negated { "~" } else { "" }, term.name))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect();
        f.write_str(&clauses.join("&&"))
    }
}

fn parse_term(raw: &str) -> Option<TagTerm> {
    let trimmed = raw.trim();
    let (negated, rest) = trimmed
        .strip_prefix('~')
        .map_or((false, trimmed), |rest| (true, rest.trim_start()));
    let name = rest.strip_prefix('@').unwrap_or(rest).trim();
    if name.is_empty() {
        return None;
    }
    if name.contains(char::is_whitespace) {
        warn!(tag = name, "whitespace in tag names is deprecated");
    }
    Some(TagTerm {
        name: name.to_string(),
        negated,
    })
}
