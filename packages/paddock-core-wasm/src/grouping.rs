use std::cmp::Ordering;
use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::UNKNOWN_PROJECT_NAME;
use crate::models::{Feature, GroupedProjectFeatures};

/// Group paddocks by `Project__Name`, falling back to "Unknown Projects".
pub fn group_projects(features: Vec<Feature>) -> GroupedProjectFeatures {
    group_projects_with_fallback(features, UNKNOWN_PROJECT_NAME)
}

/// Group paddocks by project name; features without one go under `fallback`.
///
/// Every input feature lands in exactly one group, in input order. The
/// returned groups are sorted with `locale_compare`, independent of the
/// order in which project names were first seen.
pub fn group_projects_with_fallback(features: Vec<Feature>, fallback: &str) -> GroupedProjectFeatures {
    let mut project_map: HashMap<String, Vec<Feature>> = HashMap::new();

    for feature in features {
        let project_name = feature.project_name().unwrap_or(fallback).to_string();
        project_map.entry(project_name).or_default().push(feature);
    }

    let mut groups: Vec<(String, Vec<Feature>)> = project_map.into_iter().collect();
    groups.sort_by(|a, b| locale_compare(&a.0, &b.0));

    GroupedProjectFeatures::from_sorted(groups)
}

/// Approximates the browser's default `String.prototype.localeCompare`.
///
/// Letters compare with accents folded and case ignored first, so "Émile"
/// sorts between "Bravo" and "Fred". On a tie, unaccented sorts before
/// accented ("e" < "é"), then lowercase before uppercase ("a" < "A" < "b").
/// Code point order breaks any remaining tie so the order is total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase_decomposed(a).cmp(lowercase_decomposed(b)))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

// Decomposed, combining marks dropped, lowercased
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase)
}

// Marks sit above every base letter, so a bare letter sorts before its accented form
fn lowercase_decomposed(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

// First differing character decides: lowercase before uppercase
fn case_order(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.nfd().zip(b.nfd()) {
        if ca == cb {
            continue;
        }
        return match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        };
    }
    Ordering::Equal
}
