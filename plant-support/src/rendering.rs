//! Text rendering utilities for human-friendly error messages.
//!
//! Provides helpers to format name lists, type names,
//! and "did you mean?" suggestions in error output.

/// Renders a list of names as a comma separated string.
///
/// # Examples
/// ```
/// use plant_support::rendering::render_list;
///
/// let params = vec!["author", "publisher"];
/// assert_eq!(render_list(&params), "author, publisher");
/// ```
pub fn render_list(items: &[impl AsRef<str>]) -> String {
    items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shortens a fully qualified type name for display.
///
/// ```
/// use plant_support::rendering::shorten_type_name;
///
/// let short = shorten_type_name("my_tests::models::Person");
/// assert_eq!(short, "Person");
///
/// let short = shorten_type_name("core::option::Option<alloc::string::String>");
/// assert_eq!(short, "Option<String>");
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    // "my_tests::models::Person" → "Person"
    // "Option<alloc::string::String>" → "Option<String>"
    let mut result = String::with_capacity(full_name.len());
    let mut chars = full_name.chars().peekable();
    let mut current_segment = String::new();

    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                current_segment.clear();
            }
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' => {
                result.push_str(&current_segment);
                result.push(ch);
                current_segment.clear();
            }
            _ => {
                current_segment.push(ch);
            }
        }
    }

    result.push_str(&current_segment);
    result
}

/// Generates "did you mean?" suggestions from a set of known names.
///
/// Works for type names and field names alike. Candidates are ranked by
/// substring containment first, then by edit distance.
///
/// ```
/// use plant_support::rendering::suggest_similar;
///
/// let fields = ["first_name", "last_name", "age"];
/// assert_eq!(suggest_similar("fist_name", &fields, 1), vec!["first_name"]);
/// ```
pub fn suggest_similar(requested: &str, available: &[&str], max_suggestions: usize) -> Vec<String> {
    let requested_lower = shorten_type_name(requested).to_lowercase();
    if requested_lower.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .filter_map(|&name| {
            let name_lower = shorten_type_name(name).to_lowercase();
            if name_lower == requested_lower {
                return Some((name, 200));
            }

            if name_lower.contains(&requested_lower) || requested_lower.contains(&name_lower) {
                return Some((name, 100));
            }

            let distance = edit_distance(&name_lower, &requested_lower);
            let longest = name_lower.chars().count().max(requested_lower.chars().count());
            if distance <= 2 || distance * 3 <= longest {
                return Some((name, 90 - distance.min(90)));
            }

            None
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
