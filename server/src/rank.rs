//! Scoring candidates against the query.
//!
//! Cosine similarity between bag-of-words vectors: lower-cased word counts of the query, and of each candidate's title plus transcript. Scores land in `[0, 1]`.

use crate::youtube::Candidate;
use lazy_static::lazy_static;
use querytube_protocol as proto;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").expect("programmer error: hardcoded regex is invalid");
}

fn term_counts(text: &str) -> HashMap<String, f64> {
    let mut counts = HashMap::new();
    for word in WORD.find_iter(text) {
        *counts.entry(word.as_str().to_lowercase()).or_insert(0.0) += 1.0;
    }
    counts
}

fn norm(counts: &HashMap<String, f64>) -> f64 {
    counts.values().map(|n| n * n).sum::<f64>().sqrt()
}

fn cosine(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let (na, nb) = (norm(a), norm(b));
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    let dot: f64 = a
        .iter()
        .filter_map(|(term, n)| b.get(term).map(|m| n * m))
        .sum();
    // rounding can push identical vectors a hair over 1
    (dot / (na * nb)).min(1.0)
}

/// Scores every candidate and returns them best first.
/// Ties keep the order the video API gave.
pub fn rank(query: &str, candidates: Vec<Candidate>) -> Vec<proto::VideoResult> {
    let query = term_counts(query);
    let mut results: Vec<proto::VideoResult> = candidates
        .into_iter()
        .map(|c| {
            let text = format!("{} {}", c.title, c.transcript);
            let score = cosine(&query, &term_counts(&text));
            proto::VideoResult {
                video_id: c.video_id,
                title: c.title,
                description: Some(c.description),
                thumbnail: c.thumbnail,
                score,
            }
        })
        .collect();
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn similarity(query: &str, text: &str) -> f64 {
        cosine(&term_counts(query), &term_counts(text))
    }

    fn candidate(id: &str, title: &str, transcript: &str) -> Candidate {
        Candidate {
            video_id: id.to_string(),
            title: title.to_string(),
            description: format!("description of {}", id),
            thumbnail: format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id),
            transcript: transcript.to_string(),
        }
    }

    #[test]
    fn identical_text_is_full_match() {
        let score = similarity("Rust Async", "rust async");
        assert!((score - 1.0).abs() < 1e-9, "score={}", score);
    }

    #[test]
    fn unrelated_text_is_zero() {
        assert_eq!(similarity("rust", "cooking pasta"), 0.0);
    }

    #[test]
    fn empty_text_is_zero() {
        assert_eq!(similarity("rust", ""), 0.0);
        assert_eq!(similarity("", "rust"), 0.0);
    }

    #[test]
    fn punctuation_is_ignored() {
        let score = similarity("borrow checker", "The borrow-checker, explained!");
        assert!(score > 0.5, "score={}", score);
    }

    #[test]
    fn best_match_first() {
        let results = rank(
            "rust lifetimes",
            vec![
                candidate("a", "Cooking pasta", "Italian dinner"),
                candidate("b", "Rust lifetimes explained", "lifetimes in rust"),
                candidate("c", "Rust for beginners", "getting started"),
            ],
        );
        let ids: Vec<&str> = results.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        for r in &results {
            assert!((0.0..=1.0).contains(&r.score), "score={}", r.score);
        }
    }

    #[test]
    fn ties_keep_source_order() {
        let results = rank(
            "rust",
            vec![candidate("x", "pasta", ""), candidate("y", "salad", "")],
        );
        let ids: Vec<&str> = results.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn description_is_not_scored() {
        let results = rank(
            "lifetimes",
            vec![Candidate {
                description: "lifetimes lifetimes".to_string(),
                ..candidate("a", "pasta", "")
            }],
        );
        assert_eq!(results[0].score, 0.0);
    }

    #[test]
    fn transcript_only_match_ranks_first() {
        let results = rank(
            "borrow checker",
            vec![
                candidate("a", "Episode 1", "today we cook pasta"),
                candidate("b", "Episode 2", "the borrow checker rejects this code"),
            ],
        );
        assert_eq!(results[0].video_id, "b");
        assert!(results[0].score > 0.0);
        assert_eq!(results[1].score, 0.0);
    }

    #[test]
    fn fields_carry_over() {
        let results = rank("rust", vec![candidate("abc123", "Rust", "a language")]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Rust");
        assert_eq!(results[0].description.as_deref(), Some("description of abc123"));
        assert_eq!(results[0].thumbnail, "https://i.ytimg.com/vi/abc123/hqdefault.jpg");
    }
}
