use crate::consts::ANALYSIS_YEARS;
use crate::regression::{fit_ols, OlsFit, RegressionError};
use crate::types::{MonthlyValue, RegressionExportRow, RegressionRow};
use std::collections::HashMap;

/// One joined observation: disaster count, emission sum, and mean anomaly
/// for a single (year, month) present in all three inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedMonth {
    pub year: i32,
    pub month: u32,
    pub disaster_count: f64,
    pub emission_sum: f64,
    pub anomaly_mean: f64,
}

/// Inner-join the three monthly series on (year, month). Keys missing from
/// any input are dropped; the count of dropped keys is returned alongside
/// the joined rows so shrinkage is visible in the report.
pub fn join_monthly(
    disasters: &[MonthlyValue],
    emissions: &[MonthlyValue],
    anomalies: &[MonthlyValue],
) -> (Vec<JoinedMonth>, usize) {
    let disaster_map: HashMap<(i32, u32), f64> =
        disasters.iter().map(|v| ((v.year, v.month), v.value)).collect();
    let emission_map: HashMap<(i32, u32), f64> =
        emissions.iter().map(|v| ((v.year, v.month), v.value)).collect();
    let anomaly_map: HashMap<(i32, u32), f64> =
        anomalies.iter().map(|v| ((v.year, v.month), v.value)).collect();

    let mut all_keys: Vec<(i32, u32)> = disaster_map
        .keys()
        .chain(emission_map.keys())
        .chain(anomaly_map.keys())
        .copied()
        .collect();
    all_keys.sort();
    all_keys.dedup();

    let mut joined = Vec::new();
    let mut dropped = 0usize;
    for key in all_keys {
        match (
            disaster_map.get(&key),
            emission_map.get(&key),
            anomaly_map.get(&key),
        ) {
            (Some(d), Some(e), Some(a)) => joined.push(JoinedMonth {
                year: key.0,
                month: key.1,
                disaster_count: *d,
                emission_sum: *e,
                anomaly_mean: *a,
            }),
            _ => dropped += 1,
        }
    }
    (joined, dropped)
}

/// The fit for one named model in one year, or the reason it failed.
#[derive(Debug)]
pub struct ModelRun {
    pub name: &'static str,
    pub year: i32,
    pub observations: usize,
    pub result: Result<OlsFit, RegressionError>,
}

/// Fit the three report models for each analysis year:
///
/// 1. anomaly ~ emissions
/// 2. emissions ~ disaster count
/// 3. emissions ~ disaster count + anomaly
pub fn run_yearly_models(joined: &[JoinedMonth]) -> Vec<ModelRun> {
    let mut runs = Vec::new();
    for &year in &ANALYSIS_YEARS {
        let rows: Vec<&JoinedMonth> = joined.iter().filter(|r| r.year == year).collect();
        let emissions: Vec<f64> = rows.iter().map(|r| r.emission_sum).collect();
        let anomalies: Vec<f64> = rows.iter().map(|r| r.anomaly_mean).collect();
        let counts: Vec<f64> = rows.iter().map(|r| r.disaster_count).collect();

        runs.push(ModelRun {
            name: "Anomaly ~ Emissions",
            year,
            observations: rows.len(),
            result: fit_ols(&["Value"], &[emissions.clone()], &anomalies),
        });
        runs.push(ModelRun {
            name: "Emissions ~ Disaster Count",
            year,
            observations: rows.len(),
            result: fit_ols(&["Disaster Count"], &[counts.clone()], &emissions),
        });
        runs.push(ModelRun {
            name: "Emissions ~ Disaster Count + Anomaly",
            year,
            observations: rows.len(),
            result: fit_ols(
                &["Disaster Count", "Monthly Anomaly"],
                &[counts, anomalies],
                &emissions,
            ),
        });
    }
    runs
}

/// Render a fit as display rows, statistics fixed to 4 decimal places.
/// The significance marker reflects the unrounded p-value.
pub fn coefficient_table(fit: &OlsFit) -> Vec<RegressionRow> {
    fit.coefficients
        .iter()
        .map(|c| RegressionRow {
            term: c.term.clone(),
            coefficient: format!("{:.4}", c.coefficient),
            std_error: format!("{:.4}", c.std_error),
            t_value: format!("{:.4}", c.t_value),
            p_value: format!("{:.4}", c.p_value),
            significance: if c.significant { "*" } else { "" }.to_string(),
        })
        .collect()
}

/// Flatten all successful runs into export rows for the combined CSV.
pub fn export_rows(runs: &[ModelRun]) -> Vec<RegressionExportRow> {
    let mut out = Vec::new();
    for run in runs {
        if let Ok(fit) = &run.result {
            for row in coefficient_table(fit) {
                out.push(RegressionExportRow {
                    model: run.name.to_string(),
                    year: run.year,
                    term: row.term,
                    coefficient: row.coefficient,
                    std_error: row.std_error,
                    t_value: row.t_value,
                    p_value: row.p_value,
                    significance: row.significance,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(values: &[(i32, u32, f64)]) -> Vec<MonthlyValue> {
        values
            .iter()
            .map(|&(year, month, value)| MonthlyValue { year, month, value })
            .collect()
    }

    #[test]
    fn join_keeps_only_shared_keys_and_counts_drops() {
        let disasters = series(&[(2019, 1, 4.0), (2019, 2, 2.0), (2019, 3, 1.0)]);
        let emissions = series(&[(2019, 1, 100.0), (2019, 2, 90.0)]);
        let anomalies = series(&[(2019, 1, 0.8), (2019, 2, 0.9), (2019, 4, 1.1)]);

        let (joined, dropped) = join_monthly(&disasters, &emissions, &anomalies);

        assert_eq!(joined.len(), 2);
        assert_eq!(dropped, 2); // (2019,3) and (2019,4)
        assert_eq!((joined[0].year, joined[0].month), (2019, 1));
        assert_relative_eq!(joined[0].disaster_count, 4.0);
        assert_relative_eq!(joined[0].emission_sum, 100.0);
        assert_relative_eq!(joined[0].anomaly_mean, 0.8);
    }

    #[test]
    fn yearly_models_cover_three_specs_per_year() {
        let joined: Vec<JoinedMonth> = (1..=12)
            .map(|m| JoinedMonth {
                year: 2019,
                month: m,
                disaster_count: m as f64,
                emission_sum: 100.0 + (m as f64) * 1.5 + ((m % 3) as f64),
                anomaly_mean: 0.5 + (m as f64) * 0.01,
            })
            .collect();
        let runs = run_yearly_models(&joined);

        assert_eq!(runs.len(), 6);
        let names: Vec<&str> = runs.iter().map(|r| r.name).collect();
        assert_eq!(names[0], "Anomaly ~ Emissions");
        assert_eq!(names[1], "Emissions ~ Disaster Count");
        assert_eq!(names[2], "Emissions ~ Disaster Count + Anomaly");

        // 2019 has 12 observations, 2020 has none.
        assert!(runs[0].result.is_ok());
        assert!(matches!(
            runs[3].result,
            Err(RegressionError::InsufficientData { .. })
        ));
    }

    #[test]
    fn table_rounds_to_four_decimals() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![2.1, 3.9, 6.2, 7.8];
        let fit = fit_ols(&["Value"], &[x], &y).unwrap();
        let table = coefficient_table(&fit);

        assert_eq!(table[0].term, "Intercept");
        assert_eq!(table[1].coefficient, "1.9400");
        assert_eq!(table[1].significance, "*");
        assert!(table[1].p_value.len() == 6); // "0.0022"
    }
}
