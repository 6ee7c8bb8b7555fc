//! Extended query syntax.
//!
//! | Token       | Matches when the field...          |
//! |-------------|------------------------------------|
//! | `term`      | fuzzy-matches `term`               |
//! | `=term`     | equals `term`                      |
//! | `'term`     | contains `term`                    |
//! | `!term`     | does not contain `term`            |
//! | `^term`     | starts with `term`                 |
//! | `!^term`    | does not start with `term`         |
//! | `term$`     | ends with `term`                   |
//! | `!term$`    | does not end with `term`           |
//!
//! Whitespace separates terms that must all match; `|` separates
//! alternatives. A term wrapped in double quotes keeps its spaces:
//! `'"brown butter" | ^sage !walnut`.

use crate::config::MatchOptions;
use crate::error::{Result, SearchError};
use crate::fuzzy::{BitapPattern, MatchResult, Matcher};

#[derive(Debug, Clone)]
enum Term {
    Fuzzy(BitapPattern),
    Exact(String),
    Include(String),
    InverseInclude(String),
    Prefix(String),
    InversePrefix(String),
    Suffix(String),
    InverseSuffix(String),
}

impl Term {
    fn parse(token: &str, options: &MatchOptions) -> Option<Self> {
        let lower = token.to_lowercase();
        let token = lower.as_str();

        let term = if let Some(rest) = token.strip_prefix('=') {
            Term::Exact(unquote(rest).to_string())
        } else if let Some(rest) = token.strip_prefix('\'') {
            Term::Include(unquote(rest).to_string())
        } else if let Some(rest) = token.strip_prefix("!^") {
            Term::InversePrefix(unquote(rest).to_string())
        } else if let Some(rest) = token.strip_prefix('^') {
            Term::Prefix(unquote(rest).to_string())
        } else if let Some(rest) = token.strip_prefix('!') {
            match rest.strip_suffix('$') {
                Some(inner) => Term::InverseSuffix(unquote(inner).to_string()),
                None => Term::InverseInclude(unquote(rest).to_string()),
            }
        } else if let Some(rest) = token.strip_suffix('$') {
            Term::Suffix(unquote(rest).to_string())
        } else {
            Term::Fuzzy(BitapPattern::new(unquote(token), options))
        };

        (!term.is_empty()).then_some(term)
    }

    fn is_empty(&self) -> bool {
        match self {
            Term::Fuzzy(p) => p.pattern().is_empty(),
            Term::Exact(s)
            | Term::Include(s)
            | Term::InverseInclude(s)
            | Term::Prefix(s)
            | Term::InversePrefix(s)
            | Term::Suffix(s)
            | Term::InverseSuffix(s) => s.is_empty(),
        }
    }

    fn search(&self, text: &str) -> MatchResult {
        let whole = || vec![(0, text.chars().count().saturating_sub(1))];

        let (is_match, indices) = match self {
            Term::Fuzzy(pattern) => return pattern.search(text),
            Term::Exact(s) => (text == s, whole()),
            Term::Include(s) => {
                let indices = occurrences(text, s);
                (!indices.is_empty(), indices)
            }
            Term::InverseInclude(s) => (!text.contains(s.as_str()), whole()),
            Term::Prefix(s) => (text.starts_with(s.as_str()), vec![(0, s.chars().count() - 1)]),
            Term::InversePrefix(s) => (!text.starts_with(s.as_str()), whole()),
            Term::Suffix(s) => {
                let len = text.chars().count();
                let start = len.saturating_sub(s.chars().count());
                (text.ends_with(s.as_str()), vec![(start, len.saturating_sub(1))])
            }
            Term::InverseSuffix(s) => (!text.ends_with(s.as_str()), whole()),
        };

        if is_match {
            MatchResult {
                is_match: true,
                score: 0.0,
                indices,
            }
        } else {
            MatchResult::none()
        }
    }
}

/// A parsed extended query: alternatives of conjunctions.
#[derive(Debug, Clone)]
pub struct ExtendedPattern {
    groups: Vec<Vec<Term>>,
}

impl ExtendedPattern {
    /// Parse a query. Fails when no usable term remains.
    pub fn parse(query: &str, options: &MatchOptions) -> Result<Self> {
        let groups: Vec<Vec<Term>> = query
            .split('|')
            .map(|group| {
                split_terms(group)
                    .into_iter()
                    .filter_map(|token| Term::parse(&token, options))
                    .collect::<Vec<_>>()
            })
            .filter(|terms| !terms.is_empty())
            .collect();

        if groups.is_empty() {
            return Err(SearchError::InvalidQuery(format!(
                "no search terms in {:?}",
                query
            )));
        }

        Ok(Self { groups })
    }

    /// Number of `|` alternatives.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl Matcher for ExtendedPattern {
    fn search(&self, text: &str) -> MatchResult {
        'groups: for terms in &self.groups {
            let mut indices = Vec::new();
            let mut total = 0.0;

            for term in terms {
                let result = term.search(text);
                if !result.is_match {
                    continue 'groups;
                }
                total += result.score;
                indices.extend(result.indices);
            }

            return MatchResult {
                is_match: true,
                score: total / terms.len() as f64,
                indices,
            };
        }

        MatchResult::none()
    }
}

/// Split on spaces that are not inside double quotes.
fn split_terms(group: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in group.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                current.push(c);
            }
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    terms.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        terms.push(current);
    }

    terms
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

fn occurrences(text: &str, needle: &str) -> Vec<(usize, usize)> {
    let needle_len = needle.chars().count();
    text.match_indices(needle)
        .map(|(byte_idx, _)| {
            let start = text[..byte_idx].chars().count();
            (start, start + needle_len - 1)
        })
        .collect()
}
