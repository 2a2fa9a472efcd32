use crate::normalize::{fold, slugify};

#[derive(Debug, Clone)]
pub struct BrandMatcher {
    display: String,
    tokens: Vec<String>,
}

impl BrandMatcher {
    pub fn new(brand: &str) -> Option<Self> {
        let tokens = slugify(brand)
            .split('-')
            .filter(|token| !token.is_empty())
            .map(ToOwned::to_owned)
            .collect::<Vec<String>>();
        if tokens.is_empty() {
            return None;
        }

        Some(Self {
            display: brand.trim().to_string(),
            tokens,
        })
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn strip_folded_prefix<'a>(&self, folded: &'a str) -> Option<&'a str> {
        let mut rest = folded.trim_start();
        let last = self.tokens.len() - 1;

        for (index, token) in self.tokens.iter().enumerate() {
            rest = rest.strip_prefix(token.as_str())?;
            let after_separator = rest.trim_start_matches([' ', '-']);
            let consumed_separator = after_separator.len() != rest.len();
            let at_end = index == last && after_separator.is_empty();
            if !consumed_separator && !at_end {
                return None;
            }
            rest = after_separator;
        }

        Some(rest)
    }

    pub fn starts_line(&self, line: &str) -> bool {
        self.strip_folded_prefix(&fold(line)).is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BrandCatalog {
    matchers: Vec<BrandMatcher>,
}

impl BrandCatalog {
    pub fn new<S: AsRef<str>>(brands: &[S]) -> Self {
        let mut matchers = brands
            .iter()
            .filter_map(|brand| BrandMatcher::new(brand.as_ref()))
            .collect::<Vec<BrandMatcher>>();
        matchers.sort_by(|a, b| b.display.len().cmp(&a.display.len()));
        Self { matchers }
    }

    pub fn detect<'a>(&self, title: &'a str) -> Option<(&BrandMatcher, &'a str)> {
        self.matchers.iter().find_map(|matcher| {
            matcher
                .strip_folded_prefix(title)
                .map(|rest| (matcher, rest))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleParts {
    pub model: String,
    pub version: String,
}

impl TitleParts {
    pub fn from_remainder(remainder: &str) -> Option<Self> {
        let mut tokens = remainder.split_whitespace();
        let model = tokens.next()?.to_string();
        let version = tokens.collect::<Vec<&str>>().join(" ");
        Some(Self { model, version })
    }

    pub fn split(title: &str, matcher: &BrandMatcher) -> Option<Self> {
        let folded = fold(title);
        matcher
            .strip_folded_prefix(&folded)
            .and_then(Self::from_remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matcher_requires_brand_at_line_start() {
        let matcher = BrandMatcher::new("renault").expect("matcher");
        assert!(matcher.starts_line("Renault Sandero Stepway"));
        assert!(matcher.starts_line("  RENAULT"));
        assert!(!matcher.starts_line("Vendo Renault Sandero"));
        assert!(!matcher.starts_line("Renaultsport Clio"));
    }

    #[test]
    fn matcher_accepts_space_or_hyphen_between_brand_words() {
        let matcher = BrandMatcher::new("alfa-romeo").expect("matcher");
        assert_eq!(matcher.strip_folded_prefix("alfa romeo 156 2.4"), Some("156 2.4"));
        assert_eq!(matcher.strip_folded_prefix("alfa-romeo mito"), Some("mito"));
        assert_eq!(matcher.strip_folded_prefix("alfa"), None);

        let citroen = BrandMatcher::new("Citroën").expect("matcher");
        assert!(citroen.starts_line("Citroën C3 Aircross"));
        assert!(citroen.starts_line("CITROEN C4"));
    }

    #[test]
    fn catalog_prefers_longest_brand() {
        let catalog = BrandCatalog::new(&["Land Rover", "Range Rover", "Mini", "Mitsubishi"]);
        let (matcher, rest) = catalog
            .detect("range rover evoque 2.0")
            .expect("brand detected");
        assert_eq!(matcher.display(), "Range Rover");
        assert_eq!(rest, "evoque 2.0");
        assert!(catalog.detect("minivan generic").is_none());
    }

    #[test]
    fn title_parts_split_model_from_version() {
        let matcher = BrandMatcher::new("renault").expect("matcher");
        let parts = TitleParts::split("Renault Sandero Stepway 1.6", &matcher).expect("parts");
        assert_eq!(parts.model, "sandero");
        assert_eq!(parts.version, "stepway 1.6");

        let bare = TitleParts::split("Renault Kwid", &matcher).expect("parts");
        assert_eq!(bare.version, "");
        assert!(TitleParts::split("Renault", &matcher).is_none());
    }
}
