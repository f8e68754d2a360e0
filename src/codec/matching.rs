//! Matching free text, such as a recipe ingredient line, against known names

use strsim::normalized_levenshtein;
use tracing::trace;

/// Lowest similarity accepted for a name that does not occur in the text
pub const FUZZY_CUTOFF: f64 = 0.6;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Whether `name` occurs in `text` as whole words
fn contains_words(text: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    text.match_indices(name).any(|(start, found)| {
        let before = text[..start].chars().next_back();
        let after = text[start + found.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

fn most_similar<'n, 'a: 'n>(
    candidates: impl Iterator<Item = &'n (&'a str, String)>,
    text: &str,
) -> Option<(&'a str, f64)> {
    candidates.fold(None, |best, (name, lower)| {
        let score = normalized_levenshtein(text, lower);
        match best {
            Some((_, top)) if top >= score => best,
            _ => Some((*name, score)),
        }
    })
}

/// Pick the name that best describes `text`.
///
/// Names occurring in `text` as whole words win, the most similar of them
/// first. Otherwise the most similar name is returned if it reaches
/// [`FUZZY_CUTOFF`]. Comparison ignores case and ties go to the earlier name.
///
/// # Examples
///
/// ```
/// use datatrans::codec::closest_match;
///
/// let line = "¾ cup (1½ sticks) cold unsalted butter, cut into ¼-inch pieces";
/// assert_eq!(closest_match(line, ["salted butter", "butter", "sugar"]), Some("butter"));
/// assert_eq!(closest_match(line, ["sugar", "salt", "water"]), None);
/// ```
pub fn closest_match<'a, I>(text: &str, names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let text = text.to_lowercase();
    let candidates: Vec<(&'a str, String)> = names
        .into_iter()
        .map(|name| (name, name.to_lowercase()))
        .collect();
    let hits: Vec<&(&'a str, String)> = candidates
        .iter()
        .filter(|(_, lower)| contains_words(&text, lower))
        .collect();

    let best = if hits.is_empty() {
        most_similar(candidates.iter(), &text).filter(|(_, score)| *score >= FUZZY_CUTOFF)
    } else {
        most_similar(hits.into_iter(), &text)
    };
    best.map(|(name, score)| {
        trace!(matched = name, score, "Closest match");
        name
    })
}
