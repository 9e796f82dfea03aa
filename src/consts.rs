// Project-wide constants: analysis window, country lists, keyword tables,
// file locations.

use crate::types::Topic;

/// Countries that keep individual representation in every report; all other
/// countries are folded into the "Rest of World" bucket.
pub const SPECIFIED_COUNTRIES: [&str; 11] = [
    "China",
    "United States",
    "India",
    "United Kingdom",
    "France",
    "Germany",
    "Italy",
    "Spain",
    "Russia",
    "Japan",
    "Brazil",
];

pub const REST_OF_WORLD: &str = "ROW";
pub const WORLD: &str = "WORLD";

/// Analysis window; rows outside these years are dropped during cleaning.
pub const ANALYSIS_YEARS: [i32; 2] = [2019, 2020];

pub const DATA_PATH: &str = "data";
pub const IMAGES_PATH: &str = "images";

pub const CARBON_FILE: &str = "Carbon.csv";
pub const DISASTER_FILE: &str = "Disasters.csv";
pub const TEMPERATURE_FILE: &str = "Anomaly_Temp.csv";
pub const REDDIT_FILE: &str = "Reddit.csv";

/// Long-form names appearing in the disaster source, mapped to the display
/// names used everywhere else.
pub const DISASTER_COUNTRY_RENAMES: [(&str, &str); 2] = [
    ("Russian Federation (the)", "Russian"),
    ("United States of America (the)", "United States"),
];

/// Region-name variants used by map datasets; applied when joining disaster
/// frequencies against external region names. This is a different map from
/// `DISASTER_COUNTRY_RENAMES` and must stay separate.
pub const MAP_COUNTRY_RENAMES: [(&str, &str); 2] = [
    ("United States of America", "United States"),
    ("Russian Federation", "Russia"),
];

/// Synthetic aggregate region in the carbon source, excluded so country
/// totals are not double counted.
pub const EXCLUDED_CARBON_REGION: &str = "EU27 & UK";

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Topic keyword sets, checked against post titles in this order; the
/// first set with a matching keyword wins. Matching is case-insensitive
/// substring, so "emission" also catches "emissions".
pub const TOPIC_KEYWORDS: [(Topic, &[&str]); 9] = [
    (
        Topic::SeriousnessOfGasEmissions,
        &["emission", "gas", "CO2", "carbon", "methane"],
    ),
    (
        Topic::ImportanceOfHumanIntervention,
        &[
            "human intervention",
            "climate action",
            "reduce emissions",
            "environmental policy",
        ],
    ),
    (
        Topic::GlobalStance,
        &[
            "global",
            "international",
            "world",
            "countries",
            "UN",
            "Paris Agreement",
        ],
    ),
    (
        Topic::SignificanceOfPollutionAwarenessEvents,
        &["event", "awareness", "Earth Day", "campaign", "environmental day"],
    ),
    (
        Topic::WeatherExtremes,
        &[
            "extreme weather",
            "heatwave",
            "flood",
            "drought",
            "hurricane",
            "storm",
        ],
    ),
    (
        Topic::ImpactOfResourceOverconsumption,
        &[
            "overconsumption",
            "resource depletion",
            "overuse",
            "waste",
            "consumption",
        ],
    ),
    (
        Topic::DonaldTrumpVersusScience,
        &["Trump", "Donald Trump", "administration", "climate denial"],
    ),
    (
        Topic::IdeologicalPositionsOnGlobalWarming,
        &[
            "ideology",
            "belief",
            "skeptic",
            "denier",
            "activist",
            "environmentalist",
        ],
    ),
    (
        Topic::Politics,
        &["politics", "policy", "government", "regulation", "law", "legislation"],
    ),
];

/// A comment must mention at least one of these to enter the
/// word-frequency report.
pub const CLIMATE_KEYWORDS: [&str; 18] = [
    "climate",
    "global warming",
    "emission",
    "carbon",
    "greenhouse",
    "environment",
    "sustainability",
    "pollution",
    "renewable",
    "ecology",
    "conservation",
    "biodiversity",
    "fossil fuels",
    "deforestation",
    "recycling",
    "solar",
    "wind energy",
    "eco-friendly",
];

/// Tokens excluded from the word-frequency report: common English stop
/// words plus high-frequency conversational filler observed in the
/// commentary source.
pub const STOPWORDS: [&str; 92] = [
    "a", "about", "after", "all", "am", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "before", "being", "but", "by", "can", "could", "did", "do", "does",
    "doing", "down", "for", "from", "had", "has", "have", "having", "he", "her", "here",
    "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "me", "more",
    "most", "my", "no", "not", "of", "on", "only", "or", "other", "our", "out", "over",
    "she", "so", "some", "such", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "up", "very", "was",
    "we", "were", "what", "when", "which", "while", "who", "with", "would", "you", "your",
];

/// Conversational filler observed in the commentary source, excluded on
/// top of the base stop words.
pub const EXTRA_STOPWORDS: [&str; 20] = [
    "will", "one", "now", "use", "also", "like", "say", "make", "https", "due", "get",
    "go", "going", "know", "see", "want", "think", "take", "need", "look",
];
