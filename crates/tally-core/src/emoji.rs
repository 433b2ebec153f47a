//! Emoji suggestions for new habits.
//!
//! When a habit is created without an explicit emoji, one is picked from a
//! keyword table covering common habit names in English and Spanish.

/// Keyword groups and the emoji each maps to. First match wins.
const SUGGESTIONS: &[(&[&str], &str)] = &[
    (&["water", "agua"], "💧"),
    (&["book", "read", "leer"], "📚"),
    (&["gym", "workout", "train", "entrenar"], "🏋️"),
    (&["meditate", "yoga", "meditar"], "🧘"),
    (&["sleep", "dormir"], "🛌"),
    (&["code", "program", "estudiar"], "💻"),
    (&["eat", "food", "comer"], "🥗"),
    (&["walk", "caminar"], "🚶"),
];

/// Fallback when no keyword matches.
pub const DEFAULT_EMOJI: &str = "🔥";

/// Suggests an emoji for a habit name.
pub fn suggest_emoji(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    for (keywords, emoji) in SUGGESTIONS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return emoji;
        }
    }
    DEFAULT_EMOJI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_matches() {
        assert_eq!(suggest_emoji("Drink water"), "💧");
        assert_eq!(suggest_emoji("Read 20 pages"), "📚");
        assert_eq!(suggest_emoji("Morning gym"), "🏋️");
        assert_eq!(suggest_emoji("Meditar 10 min"), "🧘");
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(suggest_emoji("WALK the dog"), "🚶");
    }

    #[test]
    fn unknown_names_get_the_fallback() {
        assert_eq!(suggest_emoji("Practice juggling"), DEFAULT_EMOJI);
    }
}
