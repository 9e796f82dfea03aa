use crate::aggregate::{
    disaster_frequency_by_country, emissions_by_month_country, monthly_disaster_frequency,
    rolling_anomaly_band, sentiment_monthly_counts,
};
use crate::consts::{MONTH_LABELS, SPECIFIED_COUNTRIES, WORLD};
use crate::types::{CommentRecord, DisasterRecord, EmissionRecord, TemperatureRecord};
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;

const CHART_SIZE: (u32, u32) = (1000, 700);

fn month_label(v: &f64) -> String {
    let idx = v.round() as i64;
    if (1..=12).contains(&idx) {
        MONTH_LABELS[(idx - 1) as usize].to_string()
    } else {
        String::new()
    }
}

fn output_path(out_dir: &str, name: &str, year: i32) -> Result<String, Box<dyn Error>> {
    std::fs::create_dir_all(out_dir)?;
    Ok(Path::new(out_dir)
        .join(format!("{}_{}.png", name, year))
        .to_string_lossy()
        .into_owned())
}

/// Monthly anomaly lines for each headline country, with the global
/// rolling average (window 2) as a dashed overlay inside its
/// ±1.96 x mean-uncertainty band.
pub fn plot_temperature_anomalies(
    records: &[TemperatureRecord],
    year: i32,
    out_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let mut by_country: BTreeMap<&str, Vec<(u32, f64)>> = BTreeMap::new();
    let mut world_points: Vec<(u32, f64)> = Vec::new();
    let mut world_uncertainties: Vec<f64> = Vec::new();

    for r in records.iter().filter(|r| r.year == year) {
        if r.country == WORLD {
            world_points.push((r.month, r.monthly_anomaly));
            world_uncertainties.push(r.monthly_uncertainty);
        } else if SPECIFIED_COUNTRIES.contains(&r.country.as_str()) {
            by_country
                .entry(r.country.as_str())
                .or_default()
                .push((r.month, r.monthly_anomaly));
        }
    }
    if by_country.is_empty() && world_points.is_empty() {
        return Err(format!("no temperature rows for {}", year).into());
    }
    for points in by_country.values_mut() {
        points.sort_by_key(|(m, _)| *m);
    }
    world_points.sort_by_key(|(m, _)| *m);

    let (rolled, half_width) = rolling_anomaly_band(&world_points, &world_uncertainties);

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for (_, v) in by_country.values().flatten() {
        y_min = y_min.min(*v);
        y_max = y_max.max(*v);
    }
    for (_, v) in &rolled {
        y_min = y_min.min(v - half_width);
        y_max = y_max.max(v + half_width);
    }
    let pad = 0.1 * (y_max - y_min).max(0.5);

    let path = output_path(out_dir, "temperature_anomalies", year)?;
    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Temperature Anomalies in {}", year),
            ("sans-serif", 28),
        )
        .margin(10)
        .set_all_label_area_size(50)
        .build_cartesian_2d(0.5f64..12.5f64, (y_min - pad)..(y_max + pad))?;
    chart
        .configure_mesh()
        .x_labels(12)
        .x_label_formatter(&month_label)
        .y_desc("Monthly Anomaly (°C)")
        .draw()?;

    if !rolled.is_empty() {
        let upper = rolled.iter().map(|(m, v)| (*m as f64, v + half_width));
        let lower = rolled.iter().rev().map(|(m, v)| (*m as f64, v - half_width));
        let band: Vec<(f64, f64)> = upper.chain(lower).collect();
        chart.draw_series(std::iter::once(Polygon::new(band, BLUE.mix(0.15))))?;

        chart
            .draw_series(DashedLineSeries::new(
                rolled.iter().map(|(m, v)| (*m as f64, *v)),
                6,
                4,
                BLACK.stroke_width(2),
            ))?
            .label("Global rolling average")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLACK.stroke_width(2)));
    }

    for (idx, (country, points)) in by_country.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(
                points.iter().map(|(m, v)| (*m as f64, *v)),
                color.stroke_width(1),
            ))?
            .label(*country)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.85))
        .draw()?;
    root.present()?;
    drop(chart);
    drop(root);
    Ok(path)
}

/// Sector-summed emissions as grouped bars, month by headline country.
pub fn plot_carbon_emissions(
    records: &[EmissionRecord],
    year: i32,
    out_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let sums = emissions_by_month_country(records, year);
    if sums.is_empty() {
        return Err(format!("no emission rows for {}", year).into());
    }
    let y_max = sums.values().copied().fold(0.0f64, f64::max) * 1.1;

    let path = output_path(out_dir, "carbon_emissions", year)?;
    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Carbon Emissions in {}", year), ("sans-serif", 28))
        .margin(10)
        .set_all_label_area_size(50)
        .build_cartesian_2d(0.5f64..12.5f64, 0.0f64..y_max)?;
    chart
        .configure_mesh()
        .x_labels(12)
        .x_label_formatter(&month_label)
        .y_desc("Emissions (Mt CO2)")
        .draw()?;

    let n = SPECIFIED_COUNTRIES.len();
    let width = 0.8 / n as f64;
    for (idx, country) in SPECIFIED_COUNTRIES.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let bars: Vec<Rectangle<(f64, f64)>> = (1..=12u32)
            .filter_map(|month| {
                sums.get(&(month, country.to_string())).map(|value| {
                    let x0 = month as f64 - 0.4 + idx as f64 * width;
                    Rectangle::new([(x0, 0.0), (x0 + width, *value)], color.filled())
                })
            })
            .collect();
        chart
            .draw_series(bars)?
            .label(*country)
            .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 12, y + 4)], color.filled()));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.85))
        .draw()?;
    root.present()?;
    drop(chart);
    drop(root);
    Ok(path)
}

/// Ranked per-country disaster frequency bars for one year, region-name
/// variants canonicalized before counting.
pub fn plot_disaster_frequency(
    rows: &[DisasterRecord],
    year: i32,
    out_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let mut freq = disaster_frequency_by_country(rows, year);
    if freq.is_empty() {
        return Err(format!("no disaster rows for {}", year).into());
    }
    freq.truncate(20);
    let y_max = freq.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64 * 1.1;
    let names: Vec<String> = freq.iter().map(|(name, _)| name.clone()).collect();

    let path = output_path(out_dir, "disaster_frequency", year)?;
    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Frequency of Disasters by Country in {}", year),
            ("sans-serif", 28),
        )
        .margin(10)
        .x_label_area_size(120)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5f64..(freq.len() as f64 - 0.5), 0.0f64..y_max)?;

    let label_names = names.clone();
    chart
        .configure_mesh()
        .x_labels(freq.len())
        .x_label_formatter(&move |v: &f64| {
            let idx = v.round() as i64;
            if idx >= 0 && (idx as usize) < label_names.len() {
                label_names[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90))
        .y_desc("Disaster Count")
        .draw()?;

    chart.draw_series(freq.iter().enumerate().map(|(i, (_, count))| {
        Rectangle::new(
            [(i as f64 - 0.35, 0.0), (i as f64 + 0.35, *count as f64)],
            Palette99::pick(i).to_rgba().filled(),
        )
    }))?;
    root.present()?;
    drop(chart);
    drop(root);
    Ok(path)
}

/// Monthly positive/negative comment counts as bars against the monthly
/// disaster frequency as a line on the secondary axis.
pub fn plot_sentiment_disaster_comparison(
    comments: &[CommentRecord],
    bucketed_disasters: &[DisasterRecord],
    year: i32,
    out_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let sentiments: Vec<(i32, u32, crate::types::Sentiment)> = comments
        .iter()
        .map(|c| (c.year, c.month, c.sentiment))
        .collect();
    let monthly_sentiment = sentiment_monthly_counts(&sentiments, year);
    let disaster_freq = monthly_disaster_frequency(bucketed_disasters, year);
    if monthly_sentiment.is_empty() && disaster_freq.is_empty() {
        return Err(format!("no sentiment or disaster rows for {}", year).into());
    }

    let bar_max = monthly_sentiment
        .iter()
        .map(|(_, pos, neg)| (*pos).max(*neg))
        .max()
        .unwrap_or(0) as f64
        * 1.2;
    let line_max = disaster_freq.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64 * 1.2;

    let path = output_path(out_dir, "sentiment_disaster_comparison", year)?;
    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Sentiment Analysis vs Disaster Frequency in {}", year),
            ("sans-serif", 28),
        )
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .right_y_label_area_size(50)
        .build_cartesian_2d(0.5f64..12.5f64, 0.0f64..bar_max.max(1.0))?
        .set_secondary_coord(0.5f64..12.5f64, 0.0f64..line_max.max(1.0));

    chart
        .configure_mesh()
        .x_labels(12)
        .x_label_formatter(&month_label)
        .y_desc("Comment Count")
        .draw()?;
    chart
        .configure_secondary_axes()
        .y_desc("Disaster Frequency")
        .draw()?;

    let pos_color = GREEN.mix(0.7);
    let neg_color = RED.mix(0.7);
    chart
        .draw_series(monthly_sentiment.iter().map(|(month, pos, _)| {
            let x0 = *month as f64 - 0.35;
            Rectangle::new([(x0, 0.0), (x0 + 0.35, *pos as f64)], pos_color.filled())
        }))?
        .label("Positive")
        .legend(|(x, y)| Rectangle::new([(x, y - 4), (x + 12, y + 4)], GREEN.filled()));
    chart
        .draw_series(monthly_sentiment.iter().map(|(month, _, neg)| {
            let x0 = *month as f64;
            Rectangle::new([(x0, 0.0), (x0 + 0.35, *neg as f64)], neg_color.filled())
        }))?
        .label("Negative")
        .legend(|(x, y)| Rectangle::new([(x, y - 4), (x + 12, y + 4)], RED.filled()));

    chart
        .draw_secondary_series(LineSeries::new(
            disaster_freq.iter().map(|(m, c)| (*m as f64, *c as f64)),
            BLUE.stroke_width(2),
        ))?
        .label("Disaster Frequency")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLUE.stroke_width(2)));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.85))
        .draw()?;
    root.present()?;
    drop(chart);
    drop(root);
    Ok(path)
}
