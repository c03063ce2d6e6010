//! Identifier sanitizing for generated constants.

/// Identifier used when the raw name is empty.
pub const UNNAMED: &str = "Unnamed";

/// Convert a human-entered name into a PascalCase identifier
/// (e.g., "move_left" -> "MoveLeft", "3d_move" -> "_3DMove").
///
/// Every character that is not an ASCII letter or digit is dropped and forces
/// the next letter to upper case. Digits are copied through and leave the
/// pending capitalization in place. A result starting with a digit gets a
/// leading underscore.
///
/// An empty input yields [`UNNAMED`]. Input made only of symbols yields an
/// empty string; callers decide how to name such entries.
pub fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        return UNNAMED.to_string();
    }

    let mut result = String::with_capacity(raw.len() + 1);
    let mut capitalize_next = true;
    for c in raw.chars() {
        if c.is_ascii_digit() {
            result.push(c);
        } else if c.is_ascii_alphabetic() {
            result.push(if capitalize_next {
                c.to_ascii_uppercase()
            } else {
                c
            });
            capitalize_next = false;
        } else {
            capitalize_next = true;
        }
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

/// Check whether `name` is usable as an identifier in generated code.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
