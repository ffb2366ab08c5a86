//! URL slugs for event names

/// Build the slug for an event name.
///
/// Every character is lowercased and then transliterated on its own: spaces
/// become hyphens and the Icelandic letters map to ASCII. Anything else is
/// kept as is, so two names may share a slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for ch in name.chars().flat_map(char::to_lowercase) {
        match ch {
            ' ' => slug.push('-'),
            'ð' => slug.push('d'),
            'þ' => slug.push_str("th"),
            'ö' | 'ó' => slug.push('o'),
            'á' => slug.push('a'),
            'é' => slug.push('e'),
            'í' => slug.push('i'),
            'ú' => slug.push('u'),
            'ý' => slug.push('y'),
            'æ' => slug.push_str("ae"),
            other => slug.push(other),
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_transliterates_and_hyphenates() {
        assert_eq!(slugify("Café Öl"), "cafe-ol");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let first = slugify("Café Öl");
        let second = slugify("Café Öl");
        assert_eq!(first, second);
        assert_eq!(slugify(&first), first);
    }

    #[test]
    fn test_slugify_icelandic_letters() {
        assert_eq!(slugify("Þorrablót"), "thorrablot");
        assert_eq!(slugify("Ðæý Úí"), "daey-ui");
    }

    #[test]
    fn test_every_space_becomes_a_hyphen() {
        assert_eq!(slugify("a  b c"), "a--b-c");
        assert_eq!(slugify(" "), "-");
    }

    #[test]
    fn test_other_characters_pass_through() {
        assert_eq!(slugify("Jól 2024!"), "jol-2024!");
        assert_eq!(slugify(""), "");
    }
}
