use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub fn norm_space(input: &str) -> String {
    input
        .replace('\u{00ad}', "")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

pub fn strip_accents(input: &str) -> String {
    input.nfkd().filter(|ch| !is_combining_mark(*ch)).collect()
}

pub fn fold(input: &str) -> String {
    let unified = input
        .replace(['\u{2019}', '\u{2018}'], "'")
        .replace(['\u{2013}', '\u{2014}'], "-");
    norm_space(&strip_accents(&unified)).to_lowercase()
}

pub fn simplify(input: &str) -> String {
    fold(input)
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .collect()
}

pub fn slugify(input: &str) -> String {
    let folded = fold(input).replace('.', "");
    let mut slug = String::with_capacity(folded.len());
    let mut pending_dash = false;

    for ch in folded.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_strips_accents_case_and_spacing() {
        assert_eq!(fold("  Citroën   C4\u{00ad} Cactus "), "citroen c4 cactus");
        assert_eq!(fold("Creá tu cuenta"), "crea tu cuenta");
        assert_eq!(fold("Mercedes\u{2013}Benz"), "mercedes-benz");
    }

    #[test]
    fn slugify_produces_directory_style_brand_names() {
        assert_eq!(slugify("Alfa Romeo"), "alfa-romeo");
        assert_eq!(slugify("Citroën"), "citroen");
        assert_eq!(slugify("D.S."), "ds");
        assert_eq!(slugify("mercedes-benz"), "mercedes-benz");
    }

    #[test]
    fn simplify_ignores_separators() {
        assert_eq!(simplify("Alfa Romeo"), simplify("alfa-romeo"));
        assert_eq!(simplify("Land  Rover"), "landrover");
    }
}
