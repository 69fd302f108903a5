//! "Did you mean" hints for mistyped variant names

use crate::variants::VariantSpec;

/// Edits allowed before a name stops counting as a near miss.
pub const MAX_EDITS: usize = 2;

/// Case-insensitive edit distance between two names.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    // Single row; `diag` holds the value up and to the left
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb { diag } else { 1 + diag.min(above).min(row[j]) };
            diag = above;
        }
    }
    row[b.len()]
}

/// Closest variant names to `query`, nearest first, at most three.
pub fn closest_variants<'a>(query: &str, specs: &'a [VariantSpec]) -> Vec<&'a str> {
    let mut scored: Vec<(usize, &str)> = specs
        .iter()
        .map(|spec| (edit_distance(query, &spec.name), spec.name.as_ref()))
        .filter(|(distance, _)| *distance <= MAX_EDITS)
        .collect();
    scored.sort_by_key(|(distance, _)| *distance);
    scored.into_iter().take(3).map(|(_, name)| name).collect()
}

/// Error text for an unknown variant name, with a hint when one is close.
pub fn unknown_variant_message(query: &str, specs: &[VariantSpec]) -> String {
    let mut message = format!("unknown variant '{}'", query);
    match closest_variants(query, specs).as_slice() {
        [] => {
            let names: Vec<&str> = specs.iter().map(|s| s.name.as_ref()).collect();
            message.push_str(&format!(" (available: {})", names.join(", ")));
        }
        [only] => message.push_str(&format!(". Did you mean '{}'?", only)),
        [first, rest @ ..] => {
            let others: Vec<String> = rest.iter().map(|n| format!("'{}'", n)).collect();
            message.push_str(&format!(". Did you mean '{}' or {}?", first, others.join(" or ")));
        }
    }
    message
}
