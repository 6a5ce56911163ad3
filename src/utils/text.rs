//! Text utilities.

/// Convert a display title into a provider URL slug.
///
/// Lowercases the title and collapses every whitespace run into a single
/// hyphen. Leading and trailing whitespace is dropped.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    match regex::Regex::new(r"\s+") {
        Ok(re) => re.replace_all(&lowered, "-").into_owned(),
        Err(_) => lowered.split_whitespace().collect::<Vec<_>>().join("-"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Hero Academia"), "my-hero-academia");
        assert_eq!(slugify("Attack  on\tTitan"), "attack-on-titan");
        assert_eq!(slugify("  Naruto "), "naruto");
    }

    #[test]
    fn test_slugify_keeps_punctuation() {
        assert_eq!(slugify("Re:Zero Season 2"), "re:zero-season-2");
    }
}
