use crate::consts::{CARBON_FILE, TEMPERATURE_FILE, WORLD};
use csv::Writer;
use std::error::Error;
use std::fs;
use std::path::Path;

pub const CARBON_MONITOR_URL: &str =
    "https://datas.carbonmonitor.org/API/downloadFullDataset.php?source=carbon_global";

const BERKELEY_REGIONAL: &str =
    "https://berkeley-earth-temperature.s3.us-west-1.amazonaws.com/Regional/TAVG";
const BERKELEY_GLOBAL: &str =
    "https://berkeley-earth-temperature.s3.us-west-1.amazonaws.com/Global/Land_and_Ocean_complete.txt";

/// One Berkeley Earth series per headline country, plus the global
/// land-and-ocean series labeled WORLD.
pub fn temperature_sources() -> Vec<(String, &'static str)> {
    let regional = [
        ("china", "China"),
        ("united-states", "United States"),
        ("india", "India"),
        ("united-kingdom", "United Kingdom"),
        ("france", "France"),
        ("germany", "Germany"),
        ("italy", "Italy"),
        ("spain", "Spain"),
        ("russia", "Russia"),
        ("japan", "Japan"),
        ("brazil", "Brazil"),
    ];
    let mut sources: Vec<(String, &'static str)> = regional
        .iter()
        .map(|(slug, country)| {
            (
                format!("{}/{}-TAVG-Trend.txt", BERKELEY_REGIONAL, slug),
                *country,
            )
        })
        .collect();
    sources.push((BERKELEY_GLOBAL.to_string(), WORLD));
    sources
}

/// Fetch the carbon dataset and save it verbatim as `Carbon.csv`.
pub fn download_carbon(data_dir: &str) -> Result<String, Box<dyn Error>> {
    fs::create_dir_all(data_dir)?;
    let response = reqwest::blocking::get(CARBON_MONITOR_URL)?;
    if !response.status().is_success() {
        return Err(format!("carbon download failed with status {}", response.status()).into());
    }
    let bytes = response.bytes()?;
    let path = Path::new(data_dir).join(CARBON_FILE);
    fs::write(&path, &bytes)?;
    Ok(path.to_string_lossy().into_owned())
}

/// Parse one Berkeley Earth trend file: `%`-comment and blank lines are
/// skipped, fields are whitespace-separated, and only the first four
/// columns (year, month, anomaly, uncertainty) are kept. "NaN" cells
/// become empty so the loader counts them instead of reading a number.
fn parse_temperature_series(text: &str, country: &str) -> Vec<[String; 5]> {
    let mut rows = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }
        let cell = |s: &str| {
            if s.eq_ignore_ascii_case("nan") {
                String::new()
            } else {
                s.to_string()
            }
        };
        rows.push([
            cell(fields[0]),
            cell(fields[1]),
            cell(fields[2]),
            cell(fields[3]),
            country.to_string(),
        ]);
    }
    rows
}

/// Fetch every temperature series and assemble them into one
/// `Anomaly_Temp.csv`. A failed series is reported and skipped; the
/// remaining series still produce a usable file.
pub fn download_temperature(data_dir: &str) -> Result<String, Box<dyn Error>> {
    fs::create_dir_all(data_dir)?;
    let client = reqwest::blocking::Client::new();
    let path = Path::new(data_dir).join(TEMPERATURE_FILE);
    let mut writer = Writer::from_path(&path)?;
    writer.write_record([
        "Year",
        "Month",
        "Monthly Anomaly",
        "Monthly Uncertainty",
        "Country",
    ])?;

    for (url, country) in temperature_sources() {
        let response = match client.get(&url).send() {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Failed to download data for {}: {}", country, e);
                continue;
            }
        };
        if !response.status().is_success() {
            eprintln!(
                "Failed to download data for {}. Status code: {}",
                country,
                response.status()
            );
            continue;
        }
        let text = response.text()?;
        for row in parse_temperature_series(&text, country) {
            writer.write_record(&row)?;
        }
    }
    writer.flush()?;
    Ok(path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_parser_skips_comments_and_masks_nan() {
        let text = "\
% Berkeley Earth analysis\n\
% Year, Month, Anomaly, Unc.\n\
\n\
 2019    1    1.234    0.056    9.9    9.9\n\
 2019    2    NaN      0.060\n\
 short line\n";
        let rows = parse_temperature_series(text, "France");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], [
            "2019".to_string(),
            "1".to_string(),
            "1.234".to_string(),
            "0.056".to_string(),
            "France".to_string(),
        ]);
        assert_eq!(rows[1][2], "");
    }

    #[test]
    fn source_list_covers_headline_countries_plus_world() {
        let sources = temperature_sources();
        assert_eq!(sources.len(), 12);
        assert_eq!(sources.last().unwrap().1, WORLD);
        assert!(sources[0].0.ends_with("china-TAVG-Trend.txt"));
    }
}
