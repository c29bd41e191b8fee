//! Case-insensitive keyword filter over log lines.
//!
//! The keyword is a literal substring: no regex, no wildcards. An empty
//! keyword matches every line.

/// Whether `line` contains `keyword`, ignoring case.
pub fn matches(line: &str, keyword: &str) -> bool {
    line.to_lowercase().contains(&keyword.to_lowercase())
}

/// Keep the lines containing `keyword`, preserving their order.
pub fn filter_all(lines: Vec<String>, keyword: &str) -> Vec<String> {
    let needle = keyword.to_lowercase();
    lines
        .into_iter()
        .filter(|line| line.to_lowercase().contains(&needle))
        .collect()
}
