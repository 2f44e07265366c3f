//! Diacritic stripping for URL-friendly strings.

#[cfg(test)]
#[path = "slug_test.rs"]
mod slug_test;

/// Base letter for each accented variant, upper and lower case alike.
const FOLDS: &[(char, &str)] = &[
    ('a', "áàãâÀÁÃÂ"),
    ('e', "éèêÉÈÊ"),
    ('i', "íìîÍÌÎ"),
    ('o', "óòôõÓÒÔÕ"),
    ('u', "úùûüÚÙÛÜ"),
    ('c', "çÇ"),
    ('n', "ñÑ"),
];

fn fold(ch: char) -> char {
    if ch == ' ' || ch == '_' {
        return '-';
    }
    FOLDS
        .iter()
        .find(|(_, variants)| variants.contains(ch))
        .map_or(ch, |(base, _)| *base)
}

/// Replace accented letters with their ASCII base and spaces or underscores
/// with `-`. Everything else is kept as is, including case.
#[must_use]
pub fn slugify(input: &str) -> String {
    input.chars().map(fold).collect()
}
