//! URL slug derivation.

/// Derive a URL slug from a post title.
///
/// Lower-cases the title, strips everything that is not a lowercase
/// letter, digit, space, or hyphen, collapses whitespace runs into a
/// single hyphen, collapses hyphen runs, and trims leading/trailing
/// hyphens.
///
/// The result is not uniquified: two titles can derive the same slug,
/// and the store's unique index is what rejects the second write.
pub fn derive(title: &str) -> String {
    let lowered = title.to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for c in lowered.chars() {
        match c {
            'a'..='z' | '0'..='9' => {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(c);
            }
            ' ' | '-' => pending_hyphen = true,
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(derive("How to Grow Your Brand"), "how-to-grow-your-brand");
    }

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(derive("Hello, World!"), "hello-world");
        assert_eq!(derive("What's Next?"), "whats-next");
    }

    #[test]
    fn test_collapses_whitespace_and_hyphens() {
        assert_eq!(derive("a   b"), "a-b");
        assert_eq!(derive("a --- b"), "a-b");
        assert_eq!(derive("a - - b"), "a-b");
    }

    #[test]
    fn test_trims_edge_hyphens() {
        assert_eq!(derive("  leading and trailing  "), "leading-and-trailing");
        assert_eq!(derive("-dashed-"), "dashed");
        assert_eq!(derive("!!wow!!"), "wow");
    }

    #[test]
    fn test_only_slug_characters_survive() {
        let slug = derive("Émojis 🎉 & Ünïcode: 10% Better!");
        assert!(!slug.is_empty());
        assert!(
            slug.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        );
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        assert!(!slug.contains("--"));
    }

    #[test]
    fn test_degenerate_title_yields_empty_slug() {
        assert_eq!(derive("???"), "");
        assert_eq!(derive("   "), "");
    }
}
