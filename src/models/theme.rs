use serde::Serialize;

/// A fixed bundle of scene prompts sharing one visual style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub prompts: &'static [&'static str],
}

/// Lowercase name with whitespace runs collapsed to `-`, used for file names.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Studio Fashion Shoot"), "studio-fashion-shoot");
        assert_eq!(slugify("Classic Black & White"), "classic-black-&-white");
        assert_eq!(slugify("  Rainy   Street\tHug "), "rainy-street-hug");
    }
}
