pub mod load;
pub mod lookup;
pub mod types;

/// Normalize a user-supplied name to the form names are stored in:
/// first character uppercased, the rest lowercased.
///
/// `"goblin"`, `"GOBLIN"` and `"Goblin"` all become `"Goblin"`.
pub fn normalize_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
