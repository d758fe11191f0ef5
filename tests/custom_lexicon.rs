// tests/custom_lexicon.rs
//
// Injected lexicons: loading from disk and sharing one across threads.

use feedback_sentiment::{Emotion, Lexicon, ScoringParams, Sentiment, SentimentAnalyzer};
use std::{fs, path::PathBuf, sync::Arc, thread};

const COURSE_LEXICON: &str = r#"{
    "words": {
        "stellar": { "weight": 0.8, "emotions": ["joy", "surprise"] },
        "dull": { "weight": -0.5, "emotions": ["sadness"] }
    },
    "negators": ["not"],
    "intensifiers": { "so": 1.5 },
    "stop_words": ["the", "was"]
}"#;

fn unique_tmp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    dir.push(format!("feedback_lexicon_test_{}", nanos));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn loads_lexicon_file_and_scores_with_it() {
    let tmp = unique_tmp_dir();
    let path = tmp.join("course.json");
    fs::write(&path, COURSE_LEXICON).unwrap();

    let lex = Arc::new(Lexicon::load_from_file(&path).unwrap());
    let analyzer = SentimentAnalyzer::with_lexicon(lex, ScoringParams::default());

    let r = analyzer.analyze("The lab was stellar");
    assert_eq!(r.sentiment, Sentiment::Positive);
    assert_eq!(r.emotions, vec![Emotion::Joy, Emotion::Surprise]);
    assert_eq!(r.keywords, vec!["lab".to_string(), "stellar".to_string()]);

    // Words from the built-in lexicon mean nothing here.
    let r = analyzer.analyze("excellent");
    assert_eq!(r.sentiment, Sentiment::Neutral);
    assert_eq!(r.confidence, ScoringParams::default().confidence_floor);

    let r = analyzer.analyze("not so dull");
    assert!(r.score > 0.0);

    let _ = fs::remove_dir_all(&tmp);
}

#[test]
fn malformed_lexicon_file_reports_path() {
    let tmp = unique_tmp_dir();
    let path = tmp.join("broken.json");
    fs::write(&path, r#"{ "words": { "meh": { "weight": "low" } } }"#).unwrap();

    let err = Lexicon::load_from_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));

    let _ = fs::remove_dir_all(&tmp);
}

#[test]
fn shared_lexicon_across_threads() {
    let analyzer = Arc::new(SentimentAnalyzer::new());
    let expected = analyzer.analyze("very helpful but slow");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let a = Arc::clone(&analyzer);
            thread::spawn(move || a.analyze("very helpful but slow"))
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}
