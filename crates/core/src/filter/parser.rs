//! Parser for textual filter expressions.
//!
//! Two forms are accepted:
//! - `[!]property.path.operator("a", 'b')`
//! - `[!]property == "a"` and `property != "a"`

use std::sync::LazyLock;

use regex::Regex;

use super::types::{Combine, FilterSet, FilterTerm, Operator};

static CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(!?)\s*([\w/.\-]+?)\.([A-Za-z_][A-Za-z0-9_]*)\s*\((.*)\)\s*$").unwrap()
});

static EQUALITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(!?)\s*([\w/.\-]+)\s*(==|!=)(.*)$").unwrap());

static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)"|'([^']*)'"#).unwrap());

/// Parse one expression. Returns `None` for anything that is not a call or an
/// equality; a call without quoted arguments yields an empty value list.
pub fn parse_term(input: &str) -> Option<FilterTerm> {
    if let Some(caps) = CALL_RE.captures(input) {
        let negated = !caps[1].is_empty();
        return Some(FilterTerm {
            property: caps[2].to_lowercase(),
            operator: Operator::from_name(&caps[3], negated),
            values: quoted_values(&caps[4]),
        });
    }

    let caps = EQUALITY_RE.captures(input)?;
    let negated = !caps[1].is_empty();
    let not_equal = &caps[3] == "!=";
    Some(FilterTerm {
        property: caps[2].to_lowercase(),
        operator: Operator::from_name("equals", negated != not_equal),
        values: quoted_values(&caps[4]),
    })
}

/// Parse a list of expressions, dropping the ones that do not parse.
pub fn parse_filter_set<'a, I>(items: I, combine: Combine) -> FilterSet
where
    I: IntoIterator<Item = &'a str>,
{
    let terms = items
        .into_iter()
        .filter_map(|item| {
            let term = parse_term(item);
            if term.is_none() {
                tracing::debug!("Ignoring unparseable filter expression: {:?}", item);
            }
            term
        })
        .collect();
    FilterSet::new(terms, combine)
}

fn quoted_values(args: &str) -> Vec<String> {
    QUOTED_RE
        .captures_iter(args)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
