use crate::consts::{CLIMATE_KEYWORDS, EXTRA_STOPWORDS, STOPWORDS, TOPIC_KEYWORDS};
use crate::types::{Sentiment, Topic, WordFrequencyRow};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Word polarity lexicon. Scores live in [-1, 1]; a comment's polarity is
/// the mean score of its matched tokens.
static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let entries: [(&str, f64); 88] = [
        // positive
        ("good", 0.7),
        ("great", 0.8),
        ("excellent", 1.0),
        ("best", 1.0),
        ("better", 0.5),
        ("amazing", 0.6),
        ("wonderful", 1.0),
        ("awesome", 1.0),
        ("perfect", 1.0),
        ("nice", 0.6),
        ("love", 0.5),
        ("like", 0.2),
        ("hope", 0.4),
        ("hopeful", 0.5),
        ("happy", 0.8),
        ("glad", 0.6),
        ("right", 0.3),
        ("true", 0.35),
        ("agree", 0.2),
        ("important", 0.4),
        ("interesting", 0.5),
        ("progress", 0.5),
        ("improve", 0.4),
        ("improved", 0.4),
        ("success", 0.6),
        ("successful", 0.6),
        ("effective", 0.6),
        ("efficient", 0.5),
        ("benefit", 0.5),
        ("helpful", 0.5),
        ("help", 0.3),
        ("support", 0.3),
        ("clean", 0.4),
        ("safe", 0.5),
        ("smart", 0.4),
        ("strong", 0.4),
        ("win", 0.4),
        ("positive", 0.3),
        ("promising", 0.6),
        ("sustainable", 0.4),
        ("thanks", 0.5),
        ("thank", 0.5),
        // negative
        ("bad", -0.7),
        ("terrible", -1.0),
        ("horrible", -1.0),
        ("awful", -1.0),
        ("worst", -1.0),
        ("worse", -0.6),
        ("wrong", -0.5),
        ("hate", -0.8),
        ("fear", -0.6),
        ("afraid", -0.6),
        ("scary", -0.6),
        ("crisis", -0.6),
        ("disaster", -0.8),
        ("catastrophe", -0.9),
        ("catastrophic", -0.9),
        ("dangerous", -0.6),
        ("danger", -0.6),
        ("toxic", -0.7),
        ("dirty", -0.6),
        ("death", -0.6),
        ("dying", -0.7),
        ("die", -0.6),
        ("destroy", -0.6),
        ("destruction", -0.6),
        ("damage", -0.5),
        ("threat", -0.5),
        ("problem", -0.4),
        ("sad", -0.5),
        ("angry", -0.6),
        ("stupid", -0.7),
        ("dumb", -0.7),
        ("lie", -0.5),
        ("lies", -0.5),
        ("fake", -0.5),
        ("corrupt", -0.7),
        ("fail", -0.5),
        ("failure", -0.6),
        ("failed", -0.5),
        ("poor", -0.4),
        ("useless", -0.6),
        ("pollute", -0.6),
        ("polluted", -0.6),
        ("ignore", -0.3),
        ("ignorant", -0.6),
        ("denial", -0.4),
        ("hoax", -0.7),
    ];
    entries.iter().copied().collect()
});

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

/// Mean lexicon score of the matched tokens, clamped to [-1, 1]. A text
/// with no lexicon hits scores exactly 0.0.
pub fn polarity(text: &str) -> f64 {
    let mut sum = 0.0;
    let mut hits = 0usize;
    for token in tokenize(text) {
        if let Some(score) = LEXICON.get(token.as_str()) {
            sum += score;
            hits += 1;
        }
    }
    if hits == 0 {
        return 0.0;
    }
    (sum / hits as f64).clamp(-1.0, 1.0)
}

/// Positive above zero, Negative below, Neutral at exactly zero.
pub fn sentiment_from_polarity(p: f64) -> Sentiment {
    if p > 0.0 {
        Sentiment::Positive
    } else if p < 0.0 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

pub fn analyze_sentiment(text: &str) -> Sentiment {
    sentiment_from_polarity(polarity(text))
}

/// First-match-wins topic tagging over the ordered keyword table; titles
/// matching no set are Undefined.
pub fn analyze_title_topic(title: &str) -> Topic {
    let lower = title.to_lowercase();
    for (topic, keywords) in TOPIC_KEYWORDS.iter() {
        if keywords.iter().any(|k| lower.contains(&k.to_lowercase())) {
            return *topic;
        }
    }
    Topic::Undefined
}

/// Word frequencies over climate-related comments: keep comments that
/// mention a climate keyword, tokenize, drop stop words and numeric
/// tokens, count, and sort by count descending (ties alphabetical).
pub fn word_frequencies(comments: &[String]) -> Vec<WordFrequencyRow> {
    static STOPSET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
        STOPWORDS
            .iter()
            .chain(EXTRA_STOPWORDS.iter())
            .copied()
            .collect()
    });

    let mut counts: HashMap<String, usize> = HashMap::new();
    for comment in comments {
        let lower = comment.to_lowercase();
        if !CLIMATE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            continue;
        }
        for token in tokenize(comment) {
            if token.len() < 2 || token.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            if STOPSET.contains(token.as_str()) {
                continue;
            }
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<WordFrequencyRow> = counts
        .into_iter()
        .map(|(word, count)| WordFrequencyRow { word, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn polarity_signs_map_to_sentiments() {
        assert_eq!(
            analyze_sentiment("This is a great step forward"),
            Sentiment::Positive
        );
        assert_eq!(
            analyze_sentiment("What a terrible, dangerous policy"),
            Sentiment::Negative
        );
        assert_eq!(analyze_sentiment("The report was published"), Sentiment::Neutral);
        assert_eq!(analyze_sentiment(""), Sentiment::Neutral);
    }

    #[test]
    fn polarity_boundaries() {
        assert_eq!(sentiment_from_polarity(0.3), Sentiment::Positive);
        assert_eq!(sentiment_from_polarity(-0.1), Sentiment::Negative);
        assert_eq!(sentiment_from_polarity(0.0), Sentiment::Neutral);
    }

    #[test]
    fn polarity_is_mean_of_matches() {
        // "good" (0.7) and "bad" (-0.7) cancel out.
        assert_relative_eq!(polarity("good and bad"), 0.0);
        assert_relative_eq!(polarity("great"), 0.8);
        assert_relative_eq!(polarity("nothing matches here"), 0.0);
    }

    #[test]
    fn topic_first_match_wins() {
        assert_eq!(
            analyze_title_topic("Global protest over carbon emission policy"),
            Topic::SeriousnessOfGasEmissions
        );
        assert_eq!(
            analyze_title_topic("Paris Agreement signatories meet again"),
            Topic::GlobalStance
        );
        assert_eq!(
            analyze_title_topic("Heatwave breaks records across Europe"),
            Topic::WeatherExtremes
        );
        assert_eq!(analyze_title_topic("Cooking pasta tonight"), Topic::Undefined);
    }

    #[test]
    fn topic_matching_is_case_insensitive() {
        assert_eq!(
            analyze_title_topic("TRUMP comments on the report"),
            Topic::DonaldTrumpVersusScience
        );
    }

    #[test]
    fn word_frequencies_filter_and_rank() {
        let comments = vec![
            "The climate crisis is a climate emergency".to_string(),
            "Carbon taxes and the climate debate".to_string(),
            "I had pasta for dinner".to_string(),
        ];
        let rows = word_frequencies(&comments);

        assert_eq!(rows[0].word, "climate");
        assert_eq!(rows[0].count, 3);
        assert!(rows.iter().all(|r| r.word != "pasta"));
        assert!(rows.iter().all(|r| r.word != "the"));
    }
}
