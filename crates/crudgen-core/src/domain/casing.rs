//! Name-case transforms used to derive every identifier a domain scaffold
//! needs from a single base name.
//!
//! These functions are pure and infallible. `to_camel_case` is always
//! `to_pascal_case` with only its first character lower-cased.

/// Words whose plural form is the word itself.
const UNCOUNTABLE: &[&str] = &[
    "data",
    "deer",
    "equipment",
    "feedback",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
    "staff",
];

/// Singular → plural pairs that no suffix rule covers.
const IRREGULAR: &[(&str, &str)] = &[
    ("analysis", "analyses"),
    ("calf", "calves"),
    ("child", "children"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("echo", "echoes"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("half", "halves"),
    ("hero", "heroes"),
    ("index", "indices"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("man", "men"),
    ("matrix", "matrices"),
    ("medium", "media"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("potato", "potatoes"),
    ("quiz", "quizzes"),
    ("shelf", "shelves"),
    ("thief", "thieves"),
    ("tomato", "tomatoes"),
    ("tooth", "teeth"),
    ("vertex", "vertices"),
    ("wife", "wives"),
    ("wolf", "wolves"),
    ("woman", "women"),
];

/// Pluralize an English identifier.
///
/// Only the last `_`/`-` separated segment is inflected, so
/// `blog_post` becomes `blog_posts`. Words that already look plural are
/// returned unchanged.
///
/// ```
/// use crudgen_core::domain::casing::pluralize;
///
/// assert_eq!(pluralize("article"), "articles");
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("person"), "people");
/// assert_eq!(pluralize("blog_entry"), "blog_entries");
/// ```
pub fn pluralize(word: &str) -> String {
    let split = word.rfind(['_', '-']).map_or(0, |i| i + 1);
    let (head, last) = word.split_at(split);
    format!("{head}{}", pluralize_word(last))
}

fn pluralize_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return match_leading_case(word, plural);
    }

    if IRREGULAR.iter().any(|(_, plural)| *plural == lower) {
        return word.to_string();
    }

    if lower.ends_with("sis") {
        return format!("{}es", &word[..word.len() - 2]);
    }

    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("as") {
        return format!("{word}es");
    }

    if lower.ends_with('s') {
        // Already plural: "articles", "users".
        return word.to_string();
    }

    if lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{word}es");
    }

    if let Some(stem) = lower.strip_suffix('y') {
        let preceded_by_vowel = stem
            .chars()
            .last()
            .is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));
        if !preceded_by_vowel {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }

    format!("{word}s")
}

fn match_leading_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        upper_first(replacement)
    } else {
        replacement.to_string()
    }
}

/// Split on `_` and `-`, upper-case the first character of every segment and
/// join the segments without separators.
///
/// ```
/// use crudgen_core::domain::casing::to_pascal_case;
///
/// assert_eq!(to_pascal_case("blog_post"), "BlogPost");
/// assert_eq!(to_pascal_case("user-role"), "UserRole");
/// assert_eq!(to_pascal_case("BlogPost"), "BlogPost");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-']).map(upper_first).collect()
}

/// `to_pascal_case` with the first character lower-cased.
pub fn to_camel_case(s: &str) -> String {
    lower_first(&to_pascal_case(s))
}

pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_plurals() {
        assert_eq!(pluralize("article"), "articles");
        assert_eq!(pluralize("comment"), "comments");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("branch"), "branches");
        assert_eq!(pluralize("wish"), "wishes");
        assert_eq!(pluralize("class"), "classes");
        assert_eq!(pluralize("status"), "statuses");
    }

    #[test]
    fn y_endings() {
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("key"), "keys");
        assert_eq!(pluralize("day"), "days");
    }

    #[test]
    fn irregular_and_uncountable() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("child"), "children");
        assert_eq!(pluralize("analysis"), "analyses");
        assert_eq!(pluralize("news"), "news");
        assert_eq!(pluralize("sheep"), "sheep");
    }

    #[test]
    fn already_plural_is_unchanged() {
        assert_eq!(pluralize("articles"), "articles");
        assert_eq!(pluralize("people"), "people");
    }

    #[test]
    fn only_last_segment_is_inflected() {
        assert_eq!(pluralize("blog_post"), "blog_posts");
        assert_eq!(pluralize("user-category"), "user-categories");
        assert_eq!(pluralize("sales_person"), "sales_people");
    }

    #[test]
    fn pascal_case_splits_on_separators() {
        assert_eq!(to_pascal_case("article"), "Article");
        assert_eq!(to_pascal_case("blog_post"), "BlogPost");
        assert_eq!(to_pascal_case("user-role_map"), "UserRoleMap");
    }

    #[test]
    fn pascal_case_is_stable_on_pascal_input() {
        for s in ["Article", "BlogPost", "UserRoleMap"] {
            assert_eq!(to_pascal_case(&to_pascal_case(s)), to_pascal_case(s));
            assert_eq!(to_pascal_case(s), s);
        }
    }

    #[test]
    fn camel_is_pascal_with_lowered_first_char() {
        for s in ["article", "blog_post", "user-role", "x", "api_key_v2"] {
            let pascal = to_pascal_case(s);
            let camel = to_camel_case(s);
            assert_eq!(camel.len(), pascal.len());
            assert_eq!(&camel[1..], &pascal[1..]);
            assert_eq!(
                camel.chars().next(),
                pascal.chars().next().map(|c| c.to_ascii_lowercase())
            );
        }
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(pluralize(""), "");
        assert_eq!(to_pascal_case(""), "");
        assert_eq!(to_camel_case(""), "");
    }
}
