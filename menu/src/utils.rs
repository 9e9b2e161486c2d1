use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Folds text for matching and ordering: accents stripped, lowercased.
/// `fold("Crème Brûlée") == "creme brulee"`.
pub fn fold(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
