use crate::consts::{ANALYSIS_YEARS, DISASTER_COUNTRY_RENAMES, EXCLUDED_CARBON_REGION};
use crate::sentiment::{analyze_sentiment, analyze_title_topic};
use crate::types::{
    CommentRecord, DisasterRecord, EmissionRecord, RawCarbonRow, RawDisasterRow, RawRedditRow,
    RawTemperatureRow, TemperatureRecord,
};
use crate::util::{
    apply_renames, parse_f64_safe, parse_i32_safe, parse_u32_safe, parse_year_month_safe, round3,
};
use csv::ReaderBuilder;
use std::error::Error;

/// Per-source cleaning diagnostics. Every loader returns one of these next
/// to its records so dropped rows are observable instead of silent.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub parse_errors: usize,
    pub out_of_window: usize,
    pub zero_filled: usize,
}

fn in_window(year: i32) -> bool {
    ANALYSIS_YEARS.contains(&year)
}

/// Load the carbon emission source: parse dates to (year, month), restrict
/// to the analysis window, exclude the synthetic "EU27 & UK" region,
/// zero-fill missing values, and round to 3 decimals.
pub fn load_carbon(path: &str) -> Result<(Vec<EmissionRecord>, LoadReport), Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut report = LoadReport::default();
    let mut records: Vec<EmissionRecord> = Vec::new();

    for result in rdr.deserialize::<RawCarbonRow>() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                report.parse_errors += 1;
                continue;
            }
        };

        let (year, month) = match parse_year_month_safe(row.date.as_deref()) {
            Some(ym) => ym,
            None => {
                report.parse_errors += 1;
                continue;
            }
        };
        if !in_window(year) {
            report.out_of_window += 1;
            continue;
        }

        let country = row
            .country
            .unwrap_or_else(|| "Unknown".to_string())
            .trim()
            .to_string();
        if country == EXCLUDED_CARBON_REGION {
            continue;
        }
        let sector = row
            .sector
            .unwrap_or_else(|| "Unspecified".to_string())
            .trim()
            .to_string();

        let value = match parse_f64_safe(row.value.as_deref()) {
            Some(v) => v,
            None => {
                report.zero_filled += 1;
                0.0
            }
        };

        records.push(EmissionRecord {
            country,
            year,
            month,
            sector,
            value: round3(value),
        });
    }

    report.kept_rows = records.len();
    Ok((records, report))
}

/// Load the disaster source: parse start dates, restrict to the analysis
/// window, apply the source's long-form country renames, and zero-fill
/// missing death counts.
pub fn load_disasters(path: &str) -> Result<(Vec<DisasterRecord>, LoadReport), Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut report = LoadReport::default();
    let mut records: Vec<DisasterRecord> = Vec::new();

    for result in rdr.deserialize::<RawDisasterRow>() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                report.parse_errors += 1;
                continue;
            }
        };

        let (year, month) = match parse_year_month_safe(row.start_date.as_deref()) {
            Some(ym) => ym,
            None => {
                report.parse_errors += 1;
                continue;
            }
        };
        if !in_window(year) {
            report.out_of_window += 1;
            continue;
        }

        let disaster_type = row
            .disaster_type
            .unwrap_or_else(|| "Unknown".to_string())
            .trim()
            .to_string();
        let country = row
            .country
            .unwrap_or_else(|| "Unknown".to_string())
            .trim()
            .to_string();
        let country = apply_renames(&country, &DISASTER_COUNTRY_RENAMES);

        let total_deaths = match parse_f64_safe(row.total_deaths.as_deref()) {
            Some(v) => v,
            None => {
                report.zero_filled += 1;
                0.0
            }
        };

        records.push(DisasterRecord {
            disaster_type,
            country,
            year,
            month,
            total_deaths,
        });
    }

    report.kept_rows = records.len();
    Ok((records, report))
}

/// Load the temperature anomaly source. Year and month arrive as separate
/// numeric columns, so no date parsing is involved; rows with an
/// unparseable anomaly are dropped rather than zero-filled, because a
/// fabricated 0.0 anomaly would be a real (and wrong) measurement.
pub fn load_temperature(
    path: &str,
) -> Result<(Vec<TemperatureRecord>, LoadReport), Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut report = LoadReport::default();
    let mut records: Vec<TemperatureRecord> = Vec::new();

    for result in rdr.deserialize::<RawTemperatureRow>() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                report.parse_errors += 1;
                continue;
            }
        };

        let year = match parse_i32_safe(row.year.as_deref()) {
            Some(y) => y,
            None => {
                report.parse_errors += 1;
                continue;
            }
        };
        let month = match parse_u32_safe(row.month.as_deref()) {
            Some(m) if (1..=12).contains(&m) => m,
            _ => {
                report.parse_errors += 1;
                continue;
            }
        };
        if !in_window(year) {
            report.out_of_window += 1;
            continue;
        }

        let monthly_anomaly = match parse_f64_safe(row.monthly_anomaly.as_deref()) {
            Some(v) => v,
            None => {
                report.parse_errors += 1;
                continue;
            }
        };
        let monthly_uncertainty = match parse_f64_safe(row.monthly_uncertainty.as_deref()) {
            Some(v) => v,
            None => {
                report.zero_filled += 1;
                0.0
            }
        };
        let country = row
            .country
            .unwrap_or_else(|| "Unknown".to_string())
            .trim()
            .to_string();

        records.push(TemperatureRecord {
            year,
            month,
            monthly_anomaly,
            monthly_uncertainty,
            country,
        });
    }

    report.kept_rows = records.len();
    Ok((records, report))
}

/// Load the commentary source: parse the post timestamp, restrict to the
/// analysis window, and classify each comment's sentiment and each title's
/// topic on the way in. Missing text fields become empty strings so the
/// classifiers see a consistent input.
pub fn load_comments(path: &str) -> Result<(Vec<CommentRecord>, LoadReport), Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut report = LoadReport::default();
    let mut records: Vec<CommentRecord> = Vec::new();

    for result in rdr.deserialize::<RawRedditRow>() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                report.parse_errors += 1;
                continue;
            }
        };

        let (year, month) = match parse_year_month_safe(row.post_created_time.as_deref()) {
            Some(ym) => ym,
            None => {
                report.parse_errors += 1;
                continue;
            }
        };
        if !in_window(year) {
            report.out_of_window += 1;
            continue;
        }

        let post = row.post_self_text.unwrap_or_default().trim().to_string();
        let title = row.post_title.unwrap_or_default().trim().to_string();
        let comment = row.self_text.unwrap_or_default().trim().to_string();

        let sentiment = analyze_sentiment(&comment);
        let topic = analyze_title_topic(&title);

        records.push(CommentRecord {
            post,
            year,
            month,
            title,
            comment,
            sentiment,
            topic,
        });
    }

    report.kept_rows = records.len();
    Ok((records, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn carbon_loader_filters_and_rounds() {
        let csv = "date,country,sector,value\n\
                   2019-01-15,China,Power,12.34567\n\
                   2018-06-01,China,Power,5.0\n\
                   2019-02-01,EU27 & UK,Power,9.9\n\
                   2019-03-01,India,Power,\n\
                   not-a-date,India,Power,1.0\n";
        let path = write_temp("carbon_loader_test.csv", csv);
        let (records, report) = load_carbon(&path).unwrap();

        assert_eq!(report.total_rows, 5);
        assert_eq!(report.out_of_window, 1);
        assert_eq!(report.parse_errors, 1);
        assert_eq!(report.zero_filled, 1);
        assert_eq!(records.len(), 2);
        assert_eq!(report.kept_rows, 2);

        let china = &records[0];
        assert_eq!(china.country, "China");
        assert_eq!((china.year, china.month), (2019, 1));
        assert!((china.value - 12.346).abs() < 1e-9);

        let india = &records[1];
        assert_eq!(india.value, 0.0);
    }

    #[test]
    fn disaster_loader_applies_renames_and_zero_fills() {
        let csv = "start_date,Disaster Type,Country,Total Deaths\n\
                   2020-07-01,Flood,Russian Federation (the),12\n\
                   2020-08-01,Storm,United States of America (the),\n";
        let path = write_temp("disaster_loader_test.csv", csv);
        let (records, report) = load_disasters(&path).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].country, "Russian");
        assert_eq!(records[1].country, "United States");
        assert_eq!(records[1].total_deaths, 0.0);
        assert_eq!(report.zero_filled, 1);
    }

    #[test]
    fn temperature_loader_drops_missing_anomaly() {
        let csv = "Year,Month,Monthly Anomaly,Monthly Uncertainty,Country\n\
                   2019,4,1.23,0.05,WORLD\n\
                   2019,5,,0.05,WORLD\n\
                   2019,13,1.0,0.05,WORLD\n";
        let path = write_temp("temperature_loader_test.csv", csv);
        let (records, report) = load_temperature(&path).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(report.parse_errors, 2);
        assert_eq!(records[0].month, 4);
    }

    #[test]
    fn comment_loader_parses_timestamps_and_classifies() {
        let csv = "post_self_text,post_created_time,post_title,self_text\n\
                   body,2019-09-20 14:05:33,Global protest over carbon emission policy,This is a great step forward\n\
                   body,2021-01-01 00:00:00,Old post,irrelevant\n";
        let path = write_temp("comment_loader_test.csv", csv);
        let (records, report) = load_comments(&path).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(report.out_of_window, 1);
        assert_eq!((records[0].year, records[0].month), (2019, 9));
        assert_eq!(records[0].topic, crate::types::Topic::SeriousnessOfGasEmissions);
    }
}
