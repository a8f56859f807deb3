//! Choosing which prefixes to score.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::source::Resource;

/// Eligible prefixes, in registry order.
///
/// A prefix is eligible when its resource has a pattern, it is not in
/// `skip`, and it does not start with anything in `skip_prefixes`. When
/// `single` is given it is returned alone, without any filtering.
pub fn select_prefixes(
    resources: &IndexMap<String, Resource>,
    skip: &BTreeSet<String>,
    skip_prefixes: &BTreeSet<String>,
    single: Option<&str>,
) -> Vec<String> {
    if let Some(single) = single {
        return vec![single.to_string()];
    }

    resources
        .iter()
        .filter(|(prefix, resource)| {
            resource.get_pattern().is_some()
                && !skip.contains(prefix.as_str())
                && !skip_prefixes.iter().any(|p| prefix.starts_with(p.as_str()))
        })
        .map(|(prefix, _)| prefix.clone())
        .collect()
}
