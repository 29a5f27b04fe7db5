//! Keyword matching for header and step lines.
//!
//! A [`KeywordMatcher`] is built once per active keyword table. Candidates
//! are pre-sorted so that the longest synonym is tried first, which keeps
//! `Scenario Outline` from being read as `Scenario` followed by text.

use gherkin_tree_keywords::{KeywordCategory, KeywordTable, StepKeyword, Synonym};

/// A header line split into its parts.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct HeaderMatch<'a> {
    pub(crate) kinds: Vec<KeywordCategory>,
    pub(crate) keyword: &'a str,
    pub(crate) title: &'a str,
}

/// A step line split into its parts.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct StepMatch<'a> {
    pub(crate) keyword_type: StepKeyword,
    pub(crate) keyword: &'a str,
    pub(crate) text: &'a str,
}

#[derive(Debug)]
pub(crate) struct KeywordMatcher {
    headers: Vec<(KeywordCategory, String)>,
    steps: Vec<(StepKeyword, Synonym)>,
}

impl KeywordMatcher {
    pub(crate) fn new(table: &KeywordTable) -> Self {
        let mut headers: Vec<(KeywordCategory, String)> = KeywordCategory::HEADER_PRIORITY
            .into_iter()
            .flat_map(|category| {
                table
                    .synonyms(category)
                    .iter()
                    .filter(|synonym| !synonym.is_wildcard())
                    .map(move |synonym| (category, synonym.text().to_string()))
            })
            .collect();
        // Stable, so equally long synonyms keep the priority order.
        headers.sort_by(|(_, a), (_, b)| b.len().cmp(&a.len()));

        let mut steps: Vec<(StepKeyword, Synonym)> = KeywordCategory::STEPS
            .into_iter()
            .filter_map(|category| StepKeyword::from_category(category).map(|kind| (category, kind)))
            .flat_map(|(category, kind)| {
                table
                    .synonyms(category)
                    .iter()
                    .map(move |synonym| (kind, synonym.clone()))
            })
            .collect();
        steps.sort_by(|(_, a), (_, b)| b.text().len().cmp(&a.text().len()));
        Self { headers, steps }
    }

    /// Match `line` (already trimmed) against the header synonyms.
    ///
    /// Every category whose synonym matches at the longest matched length is
    /// reported, in priority order.
    pub(crate) fn header<'a>(&self, line: &'a str) -> Option<HeaderMatch<'a>> {
        let mut found: Option<HeaderMatch<'a>> = None;
        for (category, text) in &self.headers {
            if let Some(current) = &found {
                if current.keyword.len() > text.len() {
                    break;
                }
            }
            let Some(title) = header_title(line, text) else {
                continue;
            };
            match &mut found {
                Some(current) => {
                    if !current.kinds.contains(category) {
                        current.kinds.push(*category);
                    }
                }
                None => {
                    found = line.get(..text.len()).map(|keyword| HeaderMatch {
                        kinds: vec![*category],
                        keyword,
                        title,
                    });
                }
            }
        }
        found
    }

    /// Match `line` (already trimmed) against the step synonyms.
    pub(crate) fn step<'a>(&self, line: &'a str) -> Option<StepMatch<'a>> {
        self.steps.iter().find_map(|(kind, synonym)| {
            let rest = line.strip_prefix(synonym.text())?;
            let keyword = line.get(..synonym.text().len())?;
            let spaced = synonym.is_spaced() || synonym.is_wildcard();
            if spaced && !rest.starts_with(char::is_whitespace) {
                return None;
            }
            let text = rest.trim();
            if text.is_empty() {
                return None;
            }
            let keyword_type = if synonym.is_wildcard() {
                StepKeyword::And
            } else {
                *kind
            };
            Some(StepMatch {
                keyword_type,
                keyword,
                text,
            })
        })
    }
}

/// Title following `keyword` when `line` is a header introduced by it.
fn header_title<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    let after = rest.trim_start();
    if let Some(title) = after.strip_prefix(':') {
        return Some(title.trim());
    }
    after.is_empty().then_some("")
}
