//! Transform arbitrary authored strings into schema-valid node and attribute
//! names, and guarantee uniqueness among siblings.
//!
//! Cleansing is mode-specific: node names are strict camel-cased tokens,
//! field names keep relative-path prefixes (`./`, `../`) and path separators,
//! prefix/postfix overlays are more permissive still.

use crate::target::Target;

/// Namespace prefixes that survive node-name cleansing. An unregistered
/// `ns:` prefix is removed rather than escaped.
const REGISTERED_NAMESPACES: [&str; 6] = ["jcr", "nt", "sling", "cq", "granite", "rep"];

/// The cleansing mode, one per authoring context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingMode {
    /// Value-holding field name: keeps relative prefixes and `/` separators.
    FieldName,
    /// Name prefix overlay: like `FieldName`, but a solo relative prefix
    /// (`./`) may stand alone.
    FieldPrefix,
    /// Name postfix overlay: bare token, no start-letter requirement.
    FieldPostfix,
    /// Output node name: camel-cased token, lowercased first letter.
    NodeName,
    /// Plain identifier without namespace or path handling.
    PlainName,
}

struct ModeSpec {
    camel_case: bool,
    keep_relative_prefix: bool,
    handle_namespace: bool,
    lowercase_first: bool,
    allow_solo_prefix: bool,
    require_letter_start: bool,
    extra: &'static [char],
}

impl NamingMode {
    fn spec(self) -> ModeSpec {
        match self {
            Self::FieldName => ModeSpec {
                camel_case: true,
                keep_relative_prefix: true,
                handle_namespace: true,
                lowercase_first: false,
                allow_solo_prefix: false,
                require_letter_start: true,
                extra: &['-', '/', ':'],
            },
            Self::FieldPrefix => ModeSpec {
                camel_case: true,
                keep_relative_prefix: true,
                handle_namespace: true,
                lowercase_first: false,
                allow_solo_prefix: true,
                require_letter_start: true,
                extra: &['-', '/', ':'],
            },
            Self::FieldPostfix => ModeSpec {
                camel_case: true,
                keep_relative_prefix: false,
                handle_namespace: false,
                lowercase_first: false,
                allow_solo_prefix: false,
                require_letter_start: false,
                extra: &['-'],
            },
            Self::NodeName => ModeSpec {
                camel_case: true,
                keep_relative_prefix: false,
                handle_namespace: true,
                lowercase_first: true,
                allow_solo_prefix: false,
                require_letter_start: true,
                extra: &[],
            },
            Self::PlainName => ModeSpec {
                camel_case: true,
                keep_relative_prefix: false,
                handle_namespace: false,
                lowercase_first: false,
                allow_solo_prefix: false,
                require_letter_start: true,
                extra: &['-'],
            },
        }
    }
}

/// Cleanse `raw` according to `mode`. A blank source returns `default`
/// unchanged; a cleansed result that is empty or fails the start-letter rule
/// gets the default prepended.
pub fn valid_name(raw: &str, mode: NamingMode, default: &str) -> String {
    let spec = mode.spec();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default.to_string();
    }

    let (prefix, rest) = if spec.keep_relative_prefix {
        split_relative_prefix(trimmed)
    } else {
        ("", trimmed)
    };

    let rest = if spec.handle_namespace {
        strip_unregistered_namespace(rest)
    } else {
        rest.to_string()
    };

    let mut cleansed = cleanse(&rest, &spec);

    if spec.lowercase_first && !is_all_uppercase(&cleansed) {
        let mut chars = cleansed.chars();
        if let Some(first) = chars.next() {
            cleansed = first.to_lowercase().collect::<String>() + chars.as_str();
        }
    }

    let acceptable = if spec.require_letter_start {
        cleansed.starts_with(|c: char| c.is_ascii_alphabetic())
    } else {
        !cleansed.is_empty()
    };

    if !acceptable {
        if cleansed.is_empty() && !prefix.is_empty() && spec.allow_solo_prefix {
            return prefix.to_string();
        }
        cleansed = format!("{default}{cleansed}");
    }

    format!("{prefix}{cleansed}")
}

/// Compute a node name valid under `mode` and unique among `parent`'s
/// children: while a sibling claims the name, any trailing digit run is
/// replaced with an incrementing suffix, starting at 1.
pub fn unique_name(raw: &str, default: &str, parent: &Target) -> String {
    let name = valid_name(raw, NamingMode::NodeName, default);
    if !parent.has_child(&name) {
        return name;
    }
    let base = name.trim_end_matches(|c: char| c.is_ascii_digit());
    let base = if base.is_empty() { name.as_str() } else { base };
    let mut index: u64 = 1;
    loop {
        let candidate = format!("{base}{index}");
        if !parent.has_child(&candidate) {
            return candidate;
        }
        index += 1;
    }
}

/// Split off a leading run of `./` and `../` segments.
fn split_relative_prefix(input: &str) -> (&str, &str) {
    let mut offset = 0;
    let bytes = input.as_bytes();
    loop {
        let rest = &bytes[offset..];
        if rest.starts_with(b"../") {
            offset += 3;
        } else if rest.starts_with(b"./") {
            offset += 2;
        } else {
            break;
        }
    }
    (&input[..offset], &input[offset..])
}

/// Remove a leading `ns:` prefix when `ns` is not a registered namespace.
/// Registered prefixes are kept verbatim, colon included.
fn strip_unregistered_namespace(input: &str) -> String {
    match input.split_once(':') {
        Some((ns, rest))
            if !ns.is_empty() && ns.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            if REGISTERED_NAMESPACES.contains(&ns) {
                input.to_string()
            } else {
                rest.to_string()
            }
        }
        _ => input.to_string(),
    }
}

fn cleanse(input: &str, spec: &ModeSpec) -> String {
    let mut out = String::with_capacity(input.len());
    let mut word_break = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !out.is_empty() {
                word_break = true;
            }
            continue;
        }
        let allowed = ch.is_ascii_alphanumeric()
            || ch == '_'
            || spec.extra.contains(&ch)
            || (spec.handle_namespace && ch == ':');
        if !allowed {
            continue;
        }
        if word_break && spec.camel_case {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        word_break = false;
    }
    out
}

fn is_all_uppercase(token: &str) -> bool {
    let mut has_alpha = false;
    for ch in token.chars() {
        if ch.is_ascii_alphabetic() {
            has_alpha = true;
            if ch.is_ascii_lowercase() {
                return false;
            }
        }
    }
    has_alpha
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_returns_default() {
        assert_eq!(valid_name("", NamingMode::NodeName, "field"), "field");
        assert_eq!(valid_name("   ", NamingMode::FieldName, "field"), "field");
    }

    #[test]
    fn test_node_name_camel_case() {
        assert_eq!(
            valid_name("My Fancy Title", NamingMode::NodeName, "field"),
            "myFancyTitle"
        );
    }

    #[test]
    fn test_node_name_all_uppercase_kept() {
        assert_eq!(valid_name("URL", NamingMode::NodeName, "field"), "URL");
    }

    #[test]
    fn test_node_name_invalid_chars_stripped() {
        assert_eq!(
            valid_name("he!!o wörld", NamingMode::NodeName, "field"),
            "heoWrld"
        );
    }

    #[test]
    fn test_node_name_digit_start_gets_default() {
        assert_eq!(
            valid_name("123column", NamingMode::NodeName, "field"),
            "field123column"
        );
    }

    #[test]
    fn test_field_name_keeps_relative_prefix() {
        assert_eq!(
            valid_name("./my/nested", NamingMode::FieldName, "field"),
            "./my/nested"
        );
        assert_eq!(
            valid_name("../up", NamingMode::FieldName, "field"),
            "../up"
        );
    }

    #[test]
    fn test_field_name_empty_after_prefix_gets_default() {
        assert_eq!(valid_name("./$%", NamingMode::FieldName, "field"), "./field");
    }

    #[test]
    fn test_solo_prefix_stands_alone_in_prefix_mode() {
        assert_eq!(valid_name("./", NamingMode::FieldPrefix, "field"), "./");
    }

    #[test]
    fn test_registered_namespace_kept() {
        assert_eq!(
            valid_name("jcr:title", NamingMode::NodeName, "field"),
            "jcr:title"
        );
    }

    #[test]
    fn test_unregistered_namespace_stripped() {
        assert_eq!(
            valid_name("foo:title", NamingMode::NodeName, "field"),
            "title"
        );
    }

    #[test]
    fn test_postfix_has_no_letter_requirement() {
        assert_eq!(valid_name("2", NamingMode::FieldPostfix, ""), "2");
    }

    #[test]
    fn test_unique_name_no_collision() {
        let parent = Target::new("items");
        assert_eq!(unique_name("color", "field", &parent), "color");
    }

    #[test]
    fn test_unique_name_collision_appends_one() {
        let mut parent = Target::new("items");
        parent.add_child(Target::new("color"));
        assert_eq!(unique_name("color", "field", &parent), "color1");
    }

    #[test]
    fn test_unique_name_overwrites_trailing_digits() {
        let mut parent = Target::new("items");
        parent.add_child(Target::new("color2"));
        // "color2" collides; the trailing digit run is replaced, not extended.
        assert_eq!(unique_name("color2", "field", &parent), "color1");
    }

    #[test]
    fn test_unique_name_increments_until_free() {
        let mut parent = Target::new("items");
        parent.add_child(Target::new("color"));
        parent.add_child(Target::new("color1"));
        assert_eq!(unique_name("color", "field", &parent), "color2");
    }

    #[test]
    fn test_pairwise_distinct_siblings() {
        let mut parent = Target::new("items");
        let mut produced = Vec::new();
        for _ in 0..5 {
            let name = unique_name("item", "field", &parent);
            parent.add_child(Target::new(name.clone()));
            produced.push(name);
        }
        let mut deduped = produced.clone();
        deduped.dedup();
        assert_eq!(produced.len(), deduped.len());
    }
}
