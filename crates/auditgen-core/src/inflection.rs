//! Naming of generated fields and types.
//!
//! Every name the generator emits goes through [`AuditInflection`]. To rename
//! the generated fields, implement the trait (overriding only what changes)
//! and pass it to the pipeline in place of [`DefaultInflection`].

use crate::introspection::ClassDescriptor;

/// Name derivation for generated schema elements.
pub trait AuditInflection {
    /// Name of the interface implemented by audited types.
    fn audited_interface(&self) -> String {
        "Audited".to_string()
    }

    /// Field holding the timestamp of the last audit event.
    fn last_modified_at(&self) -> String {
        "lastModifiedAt".to_string()
    }

    /// Field holding the actor of the last audit event.
    fn last_modified_by(&self) -> String {
        "lastModifiedBy".to_string()
    }

    /// Field holding the first audit event.
    fn first_audit_event(&self) -> String {
        "firstAuditEvent".to_string()
    }

    /// Field holding the last audit event.
    fn last_audit_event(&self) -> String {
        "lastAuditEvent".to_string()
    }

    /// Connection over all audit events.
    fn audit_events(&self) -> String {
        "auditEvents".to_string()
    }

    /// Field republishing the raw originating actor id on audit events.
    fn originating_actor_field(&self) -> String {
        "originatedByUserId".to_string()
    }

    /// Type name of an introspected class.
    fn table_type(&self, class: &ClassDescriptor) -> String {
        upper_camel_case(&singularize(&class.name))
    }

    /// Audit event type name used when the audit function cannot be found.
    fn audit_event_fallback(&self) -> String {
        "AuditEvent".to_string()
    }

    /// Connection type name over `type_name`.
    fn connection_type(&self, type_name: &str) -> String {
        format!("{}Connection", pluralize(type_name))
    }
}

/// The stock names.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInflection;

impl AuditInflection for DefaultInflection {}

/// `order_items` -> `OrderItems`.
pub fn upper_camel_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-' || c == ' ')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Words with the same singular and plural.
const UNCOUNTABLE: &[&str] = &[
    "data", "equipment", "fish", "information", "metadata", "news", "series", "sheep", "species",
];

/// Singular/plural pairs no suffix rule covers.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("life", "lives"),
    ("wife", "wives"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("half", "halves"),
    ("shelf", "shelves"),
];

/// Singulars ending in `ie`, whose plural would otherwise become `-y`.
const IE_SINGULARS: &[&str] = &[
    "auntie", "brownie", "calorie", "cookie", "die", "genie", "hippie", "lie", "movie", "pie",
    "prairie", "rookie", "selfie", "smoothie", "sortie", "tie", "zombie",
];

/// Greek `-sis` plural endings (`analyses`, `theses`, `crises`).
const SIS_PLURAL_SUFFIXES: &[&str] = &["yses", "theses", "crises", "gnoses"];

/// Byte offset where the last word of a snake, kebab or camel case name starts.
fn last_word_start(name: &str) -> usize {
    let after_separator = name
        .rfind(|c: char| c == '_' || c == '-' || c == ' ')
        .map_or(0, |i| i + 1);
    let last_upper = name
        .char_indices()
        .filter(|(_, c)| c.is_uppercase())
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0);
    after_separator.max(last_upper)
}

/// `replacement` with the first letter capitalized like `word`.
fn match_case(word: &str, replacement: &str) -> String {
    if word.chars().next().is_some_and(char::is_uppercase) {
        upper_camel_case(replacement)
    } else {
        replacement.to_string()
    }
}

/// English singular of the last word of `name`.
pub fn singularize(name: &str) -> String {
    let (head, word) = name.split_at(last_word_start(name));
    format!("{}{}", head, singularize_word(word))
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == lower) {
        return match_case(word, singular);
    }
    if IE_SINGULARS
        .iter()
        .any(|singular| lower.strip_suffix('s') == Some(*singular))
    {
        return word[..word.len() - 1].to_string();
    }
    if SIS_PLURAL_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        return format!("{}is", &word[..word.len() - 2]);
    }
    if lower.len() > 3 && lower.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    for suffix in ["uses", "sses", "shes", "ches", "xes", "zzes"] {
        if lower.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if lower.len() > 1
        && lower.ends_with('s')
        && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s))
    {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// English plural of the last word of `name`.
pub fn pluralize(name: &str) -> String {
    let (head, word) = name.split_at(last_word_start(name));
    format!("{}{}", head, pluralize_word(word))
}

fn pluralize_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return match_case(word, plural);
    }
    if lower.ends_with("sis") {
        return format!("{}es", &word[..word.len() - 2]);
    }
    if lower.ends_with('y') && !["ay", "ey", "oy", "uy"].iter().any(|s| lower.ends_with(s)) {
        return format!("{}ies", &word[..word.len() - 1]);
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{}es", word);
    }
    format!("{}s", word)
}
