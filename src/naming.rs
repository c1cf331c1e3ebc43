//! Identifier case conversion and English inflection.
//!
//! Relation inference and every generator need the same handful of
//! transformations: `country_id` → `Country` (StudlyCase), `BlogPost` →
//! `blog_posts` (snake plural), `cruds` → `crud` (singular route parameter).
//!
//! ```rust
//! use crudsmith::naming::{to_studly_case, to_snake_case, pluralize};
//!
//! assert_eq!(to_studly_case("blog_post"), "BlogPost");
//! assert_eq!(to_snake_case("BlogPost"), "blog_post");
//! assert_eq!(pluralize("country"), "countries");
//! ```

/// Words that have the same singular and plural form.
const UNCOUNTABLE: &[&str] = &[
    "audio",
    "data",
    "equipment",
    "feedback",
    "information",
    "media",
    "metadata",
    "money",
    "news",
    "series",
    "sheep",
    "species",
];

/// Irregular singular → plural pairs.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Split an identifier into lowercase words.
///
/// Underscores, dashes, whitespace and lower→upper case transitions all
/// start a new word, so `blog_post`, `blog-post`, `blog post` and `BlogPost`
/// yield the same words.
fn words(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut prev_lower_or_digit = false;
    for c in s.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            prev_lower_or_digit = false;
            continue;
        }
        if c.is_uppercase() && prev_lower_or_digit && !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        prev_lower_or_digit = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert an identifier to StudlyCase (`country_id` → `CountryId`).
pub fn to_studly_case(s: &str) -> String {
    words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert an identifier to camelCase (`BlogPost` → `blogPost`).
pub fn to_camel_case(s: &str) -> String {
    let studly = to_studly_case(s);
    let mut chars = studly.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert an identifier to snake_case (`BlogPost` → `blog_post`).
pub fn to_snake_case(s: &str) -> String {
    words(s).join("_")
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn pluralize_word(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(single, _)| *single == word) {
        return (*plural).to_string();
    }
    if IRREGULAR.iter().any(|(_, plural)| *plural == word) {
        return word.to_string();
    }
    let before_last = word.chars().rev().nth(1);
    if let Some(stem) = word.strip_suffix('y') {
        if before_last.is_some_and(|c| !is_vowel(c)) {
            return format!("{stem}ies");
        }
    }
    if word.ends_with("ss")
        || word.ends_with("sh")
        || word.ends_with("ch")
        || word.ends_with('x')
        || word.ends_with('z')
    {
        return format!("{word}es");
    }
    if word.ends_with("us") || word.ends_with("is") {
        return format!("{word}es");
    }
    if word.ends_with('s') {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("fe") {
        return format!("{stem}ves");
    }
    if let Some(stem) = word.strip_suffix('f') {
        if !word.ends_with("ff") && !word.ends_with("ief") {
            return format!("{stem}ves");
        }
    }
    format!("{word}s")
}

fn singularize_word(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((single, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == word) {
        return (*single).to_string();
    }
    if IRREGULAR.iter().any(|(single, _)| *single == word) {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = word.strip_suffix("ves") {
        return format!("{stem}f");
    }
    for suffix in ["sses", "shes", "ches", "xes", "zes", "uses"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}

/// Pluralize the last word of a snake_case identifier (`blog_post` → `blog_posts`).
pub fn pluralize(s: &str) -> String {
    match s.rsplit_once('_') {
        Some((head, last)) => format!("{head}_{}", pluralize_word(last)),
        None => pluralize_word(s),
    }
}

/// Singularize the last word of a snake_case identifier (`categories` → `category`).
pub fn singularize(s: &str) -> String {
    match s.rsplit_once('_') {
        Some((head, last)) => format!("{head}_{}", singularize_word(last)),
        None => singularize_word(s),
    }
}

/// Default table name for an entity: snake_case plural (`BlogPost` → `blog_posts`).
pub fn table_name(entity: &str) -> String {
    pluralize(&to_snake_case(entity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_studly_case() {
        assert_eq!(to_studly_case("country"), "Country");
        assert_eq!(to_studly_case("blog_post"), "BlogPost");
        assert_eq!(to_studly_case("blog-post"), "BlogPost");
        assert_eq!(to_studly_case("blog post"), "BlogPost");
        assert_eq!(to_studly_case("BlogPost"), "BlogPost");
        assert_eq!(to_studly_case("_leading__underscores_"), "LeadingUnderscores");
        assert_eq!(to_studly_case(""), "");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("BlogPost"), "blog_post");
        assert_eq!(to_snake_case("Country"), "country");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("Product2Variant"), "product2_variant");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("Country"), "country");
        assert_eq!(to_camel_case("blog_post"), "blogPost");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("country"), "countries");
        assert_eq!(pluralize("crud"), "cruds");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("match"), "matches");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("leaf"), "leaves");
        assert_eq!(pluralize("media"), "media");
        assert_eq!(pluralize("blog_category"), "blog_categories");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("countries"), "country");
        assert_eq!(singularize("cruds"), "crud");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("blog_posts"), "blog_post");
        assert_eq!(singularize("status"), "status");
    }

    #[test]
    fn test_table_name() {
        assert_eq!(table_name("Product"), "products");
        assert_eq!(table_name("BlogPost"), "blog_posts");
        assert_eq!(table_name("Category"), "categories");
    }
}
