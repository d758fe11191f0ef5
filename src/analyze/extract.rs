//! Emotion tags and frequency-ranked keywords for one entry.

use std::collections::HashMap;
use std::hash::Hash;

use crate::lexicon::{Emotion, Lexicon};

/// Emotions and keywords pulled out of a single text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Distinct emotion tags, most frequent first.
    pub emotions: Vec<Emotion>,
    /// Up to `keyword_limit` content tokens, most frequent first.
    pub keywords: Vec<String>,
}

/// `tokens` is the full normalized view, `content` the stop-word-free view.
pub fn extract(
    tokens: &[String],
    content: &[String],
    lexicon: &Lexicon,
    keyword_limit: usize,
) -> Extraction {
    let tags = tokens
        .iter()
        .filter_map(|t| lexicon.entry(t))
        .flat_map(|e| e.emotions.iter().copied());

    let emotions = rank_by_frequency(tags, usize::MAX)
        .into_iter()
        .map(|(e, _)| e)
        .collect();

    let keywords = rank_by_frequency(content.iter().cloned(), keyword_limit)
        .into_iter()
        .map(|(k, _)| k)
        .collect();

    Extraction { emotions, keywords }
}

/// Count items and return `(item, count)` by descending count, ties broken by
/// first occurrence, truncated to `limit`.
pub fn rank_by_frequency<T, I>(items: I, limit: usize) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut slot: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();

    for item in items {
        match slot.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slot.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{content_tokens, normalize};

    fn run(text: &str, limit: usize) -> Extraction {
        let lex = Lexicon::builtin();
        let tokens = normalize(text);
        let content = content_tokens(&tokens, &lex);
        extract(&tokens, &content, &lex, limit)
    }

    #[test]
    fn ranking_breaks_ties_by_first_occurrence() {
        let ranked = rank_by_frequency(["b", "a", "c", "a", "b", "d"], 3);
        assert_eq!(ranked, vec![("b", 2), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn ranking_empty_input() {
        let ranked: Vec<(&str, usize)> = rank_by_frequency(Vec::<&str>::new(), 5);
        assert!(ranked.is_empty());
    }

    #[test]
    fn keywords_are_frequency_ranked_and_capped() {
        let out = run(
            "Recursion examples were great. More recursion practice, more examples, recursion!",
            2,
        );
        assert_eq!(out.keywords, vec!["recursion", "examples"]);
    }

    #[test]
    fn emotions_are_distinct_and_frequency_ordered() {
        // terrible → anger, disgust; awful → disgust; confusing → fear
        let out = run("terrible and awful, also confusing", 5);
        assert_eq!(
            out.emotions,
            vec![Emotion::Disgust, Emotion::Anger, Emotion::Fear]
        );
    }

    #[test]
    fn keywords_skip_negators_and_intensifiers() {
        let lex = Lexicon::builtin();
        let out = run("The slides weren't helpful and it won't help, doesn't work", 5);
        assert_eq!(out.keywords, vec!["slides", "helpful", "help", "work"]);

        let out = run("hardly helpful, barely extremely clear without examples", 5);
        assert_eq!(out.keywords, vec!["helpful", "clear", "examples"]);
        for k in &out.keywords {
            assert!(!lex.is_negator(k) && lex.intensifier(k).is_none(), "{k}");
        }
    }

    #[test]
    fn no_matches_means_no_emotions() {
        let out = run("the room had chairs", 5);
        assert!(out.emotions.is_empty());
        assert_eq!(out.keywords, vec!["room", "chairs"]);
    }
}
