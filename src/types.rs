use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Deserialize)]
pub struct RawCarbonRow {
    #[serde(rename = "date")]
    pub date: Option<String>,
    #[serde(rename = "country")]
    pub country: Option<String>,
    #[serde(rename = "sector")]
    pub sector: Option<String>,
    #[serde(rename = "value")]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawDisasterRow {
    #[serde(rename = "start_date")]
    pub start_date: Option<String>,
    #[serde(rename = "Disaster Type")]
    pub disaster_type: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Total Deaths")]
    pub total_deaths: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawTemperatureRow {
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Month")]
    pub month: Option<String>,
    #[serde(rename = "Monthly Anomaly")]
    pub monthly_anomaly: Option<String>,
    #[serde(rename = "Monthly Uncertainty")]
    pub monthly_uncertainty: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawRedditRow {
    #[serde(rename = "post_self_text")]
    pub post_self_text: Option<String>,
    #[serde(rename = "post_created_time")]
    pub post_created_time: Option<String>,
    #[serde(rename = "post_title")]
    pub post_title: Option<String>,
    #[serde(rename = "self_text")]
    pub self_text: Option<String>,
}

/// One emission reading per country/sector/month, value rounded to 3 decimals.
#[derive(Debug, Clone, Serialize)]
pub struct EmissionRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Value")]
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemperatureRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Monthly Anomaly")]
    pub monthly_anomaly: f64,
    #[serde(rename = "Monthly Uncertainty")]
    pub monthly_uncertainty: f64,
    #[serde(rename = "Country")]
    pub country: String,
}

/// A disaster event or, after bucketing, an aggregate row labeled with the
/// ROW or WORLD bucket name.
#[derive(Debug, Clone, Serialize)]
pub struct DisasterRecord {
    #[serde(rename = "Disaster Type")]
    pub disaster_type: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Total Deaths")]
    pub total_deaths: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Topic {
    #[serde(rename = "Seriousness of gas emissions")]
    SeriousnessOfGasEmissions,
    #[serde(rename = "Importance of human intervention")]
    ImportanceOfHumanIntervention,
    #[serde(rename = "Global stance")]
    GlobalStance,
    #[serde(rename = "Significance of pollution awareness events")]
    SignificanceOfPollutionAwarenessEvents,
    #[serde(rename = "Weather extremes")]
    WeatherExtremes,
    #[serde(rename = "Impact of resource overconsumption")]
    ImpactOfResourceOverconsumption,
    #[serde(rename = "Donald Trump versus science")]
    DonaldTrumpVersusScience,
    #[serde(rename = "Ideological positions on global warming")]
    IdeologicalPositionsOnGlobalWarming,
    #[serde(rename = "Politics")]
    Politics,
    #[serde(rename = "Undefined")]
    Undefined,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentRecord {
    #[serde(rename = "Post")]
    pub post: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Comment")]
    pub comment: String,
    #[serde(rename = "Comment_Sentiment")]
    pub sentiment: Sentiment,
    #[serde(rename = "Topic")]
    pub topic: Topic,
}

/// One numeric measure per (year, month); the shape every monthly aggregate
/// shares regardless of which measure it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyValue {
    pub year: i32,
    pub month: u32,
    pub value: f64,
}

/// Rendered coefficient-table row; statistics pre-formatted to 4 decimal
/// places for console and CSV output.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RegressionRow {
    #[serde(rename = "Term")]
    #[tabled(rename = "Term")]
    pub term: String,
    #[serde(rename = "Coefficient")]
    #[tabled(rename = "Coefficient")]
    pub coefficient: String,
    #[serde(rename = "Std Error")]
    #[tabled(rename = "Std Error")]
    pub std_error: String,
    #[serde(rename = "t Value")]
    #[tabled(rename = "t Value")]
    pub t_value: String,
    #[serde(rename = "P>|t|")]
    #[tabled(rename = "P>|t|")]
    pub p_value: String,
    #[serde(rename = "Significance")]
    #[tabled(rename = "Significance")]
    pub significance: String,
}

/// Flattened regression row for the combined CSV export, carrying the model
/// and year the row belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct RegressionExportRow {
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Term")]
    pub term: String,
    #[serde(rename = "Coefficient")]
    pub coefficient: String,
    #[serde(rename = "Std Error")]
    pub std_error: String,
    #[serde(rename = "t Value")]
    pub t_value: String,
    #[serde(rename = "P>|t|")]
    pub p_value: String,
    #[serde(rename = "Significance")]
    pub significance: String,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct WordFrequencyRow {
    #[serde(rename = "Word")]
    #[tabled(rename = "Word")]
    pub word: String,
    #[serde(rename = "Count")]
    #[tabled(rename = "Count")]
    pub count: usize,
}

/// Row counts recorded while loading, exported as `data_summary.json`.
#[derive(Debug, Serialize)]
pub struct ProcessingSummary {
    pub emission_rows: usize,
    pub temperature_rows: usize,
    pub disaster_rows: usize,
    pub comment_rows: usize,
    pub parse_errors: usize,
    pub out_of_window: usize,
    pub zero_filled: usize,
}
