use crate::consts::{MAP_COUNTRY_RENAMES, REST_OF_WORLD, SPECIFIED_COUNTRIES, WORLD};
use crate::types::{DisasterRecord, EmissionRecord, MonthlyValue, Sentiment, TemperatureRecord};
use crate::util::{apply_renames, average};
use std::collections::{BTreeMap, HashMap};

/// Fold the disaster table into headline rows plus two synthetic buckets.
///
/// 1. All rows grouped by (year, month, type), deaths summed, labeled WORLD.
/// 2. Rows for headline countries kept as-is.
/// 3. Remaining rows grouped the same way, labeled ROW.
///
/// The WORLD bucket is aggregated from the raw rows, not from headline+ROW;
/// callers filter on country before any further aggregation.
pub fn bucket_disasters(
    rows: &[DisasterRecord],
    headline: &[&str],
    rest_label: &str,
    world_label: &str,
) -> Vec<DisasterRecord> {
    let mut world: BTreeMap<(i32, u32, String), f64> = BTreeMap::new();
    for r in rows {
        *world
            .entry((r.year, r.month, r.disaster_type.clone()))
            .or_insert(0.0) += r.total_deaths;
    }

    let (headline_rows, other_rows): (Vec<&DisasterRecord>, Vec<&DisasterRecord>) = rows
        .iter()
        .partition(|r| headline.contains(&r.country.as_str()));

    let mut rest: BTreeMap<(i32, u32, String), f64> = BTreeMap::new();
    for r in &other_rows {
        *rest
            .entry((r.year, r.month, r.disaster_type.clone()))
            .or_insert(0.0) += r.total_deaths;
    }

    let mut out: Vec<DisasterRecord> = headline_rows.into_iter().cloned().collect();
    for ((year, month, disaster_type), total_deaths) in rest {
        out.push(DisasterRecord {
            disaster_type,
            country: rest_label.to_string(),
            year,
            month,
            total_deaths,
        });
    }
    for ((year, month, disaster_type), total_deaths) in world {
        out.push(DisasterRecord {
            disaster_type,
            country: world_label.to_string(),
            year,
            month,
            total_deaths,
        });
    }
    out
}

pub fn bucket_disasters_default(rows: &[DisasterRecord]) -> Vec<DisasterRecord> {
    bucket_disasters(rows, &SPECIFIED_COUNTRIES, REST_OF_WORLD, WORLD)
}

fn sorted_monthly(map: BTreeMap<(i32, u32), f64>) -> Vec<MonthlyValue> {
    map.into_iter()
        .map(|((year, month), value)| MonthlyValue { year, month, value })
        .collect()
}

/// Disaster event count per (year, month) over the bucketed table,
/// excluding the WORLD aggregate rows so global totals are not counted as
/// extra events.
pub fn monthly_disaster_counts(bucketed: &[DisasterRecord]) -> Vec<MonthlyValue> {
    let mut counts: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for r in bucketed.iter().filter(|r| r.country != WORLD) {
        *counts.entry((r.year, r.month)).or_insert(0.0) += 1.0;
    }
    sorted_monthly(counts)
}

/// Sector-summed emissions per (year, month), WORLD rows only.
pub fn monthly_emission_sums(records: &[EmissionRecord]) -> Vec<MonthlyValue> {
    let mut sums: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for r in records.iter().filter(|r| r.country == WORLD) {
        *sums.entry((r.year, r.month)).or_insert(0.0) += r.value;
    }
    sorted_monthly(sums)
}

/// Mean anomaly per (year, month), WORLD rows only.
pub fn monthly_anomaly_means(records: &[TemperatureRecord]) -> Vec<MonthlyValue> {
    let mut grouped: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
    for r in records.iter().filter(|r| r.country == WORLD) {
        grouped
            .entry((r.year, r.month))
            .or_default()
            .push(r.monthly_anomaly);
    }
    grouped
        .into_iter()
        .map(|((year, month), values)| MonthlyValue {
            year,
            month,
            value: average(&values),
        })
        .collect()
}

/// Sector-summed emissions per (month, country) for headline countries in
/// the given year, for the grouped-bar chart.
pub fn emissions_by_month_country(
    records: &[EmissionRecord],
    year: i32,
) -> BTreeMap<(u32, String), f64> {
    let mut sums: BTreeMap<(u32, String), f64> = BTreeMap::new();
    for r in records.iter().filter(|r| {
        r.year == year && SPECIFIED_COUNTRIES.contains(&r.country.as_str())
    }) {
        *sums.entry((r.month, r.country.clone())).or_insert(0.0) += r.value;
    }
    sums
}

/// Disaster event counts per country for the given year, over the original
/// (un-bucketed) rows, with external region-name variants canonicalized.
/// Returned descending by count.
pub fn disaster_frequency_by_country(
    rows: &[DisasterRecord],
    year: i32,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in rows.iter().filter(|r| r.year == year) {
        let name = apply_renames(&r.country, &MAP_COUNTRY_RENAMES);
        *counts.entry(name).or_insert(0) += 1;
    }
    let mut out: Vec<(String, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Per-month positive and negative comment counts for the given year.
/// Neutral comments are excluded from the comparison chart.
pub fn sentiment_monthly_counts(
    sentiments: &[(i32, u32, Sentiment)],
    year: i32,
) -> Vec<(u32, usize, usize)> {
    let mut counts: BTreeMap<u32, (usize, usize)> = BTreeMap::new();
    for (_, month, sentiment) in sentiments.iter().filter(|(y, _, _)| *y == year) {
        let entry = counts.entry(*month).or_insert((0, 0));
        match sentiment {
            Sentiment::Positive => entry.0 += 1,
            Sentiment::Negative => entry.1 += 1,
            Sentiment::Neutral => {}
        }
    }
    counts
        .into_iter()
        .map(|(month, (pos, neg))| (month, pos, neg))
        .collect()
}

/// Monthly disaster event counts for one year over the full bucketed table
/// (WORLD rows included), for the secondary axis of the comparison chart.
pub fn monthly_disaster_frequency(bucketed: &[DisasterRecord], year: i32) -> Vec<(u32, usize)> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for r in bucketed.iter().filter(|r| r.year == year) {
        *counts.entry(r.month).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Rolling mean (window 2, first element kept as-is) with a symmetric
/// ±1.96 x mean-uncertainty band, for the anomaly chart overlay. Input
/// points must already be sorted by month.
pub fn rolling_anomaly_band(
    points: &[(u32, f64)],
    uncertainties: &[f64],
) -> (Vec<(u32, f64)>, f64) {
    let mut rolled: Vec<(u32, f64)> = Vec::with_capacity(points.len());
    for (i, (month, value)) in points.iter().enumerate() {
        let mean = if i == 0 {
            *value
        } else {
            (points[i - 1].1 + value) / 2.0
        };
        rolled.push((*month, mean));
    }
    let half_width = 1.96 * average(uncertainties);
    (rolled, half_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn event(country: &str, year: i32, month: u32, kind: &str, deaths: f64) -> DisasterRecord {
        DisasterRecord {
            disaster_type: kind.to_string(),
            country: country.to_string(),
            year,
            month,
            total_deaths: deaths,
        }
    }

    #[test]
    fn bucketing_keeps_headline_rows_and_adds_both_buckets() {
        let rows = vec![
            event("China", 2019, 5, "Flood", 10.0),
            event("India", 2019, 5, "Flood", 5.0),
            event("Fiji", 2019, 5, "Flood", 2.0),
        ];
        let bucketed = bucket_disasters_default(&rows);

        // 2 headline rows + 1 ROW aggregate + 1 WORLD aggregate.
        assert_eq!(bucketed.len(), 4);

        let row_bucket = bucketed.iter().find(|r| r.country == REST_OF_WORLD).unwrap();
        assert_relative_eq!(row_bucket.total_deaths, 2.0);

        let world = bucketed.iter().find(|r| r.country == WORLD).unwrap();
        assert_relative_eq!(world.total_deaths, 17.0);
    }

    #[test]
    fn bucketed_row_count_identity() {
        let rows = vec![
            event("China", 2019, 1, "Storm", 1.0),
            event("Peru", 2019, 1, "Storm", 1.0),
            event("Peru", 2019, 2, "Flood", 3.0),
            event("Chile", 2019, 2, "Flood", 4.0),
        ];
        let bucketed = bucket_disasters_default(&rows);

        let headline = bucketed
            .iter()
            .filter(|r| SPECIFIED_COUNTRIES.contains(&r.country.as_str()))
            .count();
        let row_groups = bucketed.iter().filter(|r| r.country == REST_OF_WORLD).count();
        let world_groups = bucketed.iter().filter(|r| r.country == WORLD).count();

        assert_eq!(headline, 1);
        assert_eq!(row_groups, 2); // (1,Storm) and (2,Flood)
        assert_eq!(world_groups, 2); // same keys, aggregated over all rows
        assert_eq!(bucketed.len(), headline + row_groups + world_groups);
    }

    #[test]
    fn disaster_counts_exclude_world() {
        let rows = vec![
            event("China", 2019, 5, "Flood", 10.0),
            event("Fiji", 2019, 5, "Flood", 2.0),
        ];
        let bucketed = bucket_disasters_default(&rows);
        let counts = monthly_disaster_counts(&bucketed);
        assert_eq!(counts.len(), 1);
        // 1 headline event + 1 ROW aggregate; the WORLD row is not counted.
        assert_relative_eq!(counts[0].value, 2.0);
    }

    #[test]
    fn emission_sums_use_world_rows_only() {
        let records = vec![
            EmissionRecord {
                country: "WORLD".to_string(),
                year: 2019,
                month: 1,
                sector: "Power".to_string(),
                value: 3.0,
            },
            EmissionRecord {
                country: "WORLD".to_string(),
                year: 2019,
                month: 1,
                sector: "Industry".to_string(),
                value: 2.0,
            },
            EmissionRecord {
                country: "China".to_string(),
                year: 2019,
                month: 1,
                sector: "Power".to_string(),
                value: 99.0,
            },
        ];
        let sums = monthly_emission_sums(&records);
        assert_eq!(sums.len(), 1);
        assert_relative_eq!(sums[0].value, 5.0);
    }

    #[test]
    fn frequency_join_canonicalizes_region_names() {
        let rows = vec![
            event("United States of America", 2019, 3, "Storm", 0.0),
            event("United States", 2019, 6, "Flood", 0.0),
            event("Russian Federation", 2019, 7, "Storm", 0.0),
        ];
        let freq = disaster_frequency_by_country(&rows, 2019);
        assert_eq!(freq[0], ("United States".to_string(), 2));
        assert_eq!(freq[1], ("Russia".to_string(), 1));
    }

    #[test]
    fn rolling_band_window_two() {
        let points = vec![(1, 1.0), (2, 3.0), (3, 5.0)];
        let (rolled, half_width) = rolling_anomaly_band(&points, &[0.1, 0.1, 0.1]);
        assert_relative_eq!(rolled[0].1, 1.0);
        assert_relative_eq!(rolled[1].1, 2.0);
        assert_relative_eq!(rolled[2].1, 4.0);
        assert_relative_eq!(half_width, 1.96 * 0.1, epsilon = 1e-12);
    }
}
