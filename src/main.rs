// Entry point and high-level CLI flow.
//
// The console shell exposes the whole pipeline as numbered options:
// - Option [1] downloads the remote source datasets.
// - Option [2] loads and cleans all four sources, printing diagnostics
//   and writing processed snapshots.
// - Option [3] prints and exports the regression report.
// - Option [4] renders the chart views for a chosen year.
// - Option [5] prints and exports the word-frequency report.
mod aggregate;
mod analysis;
mod charts;
mod consts;
mod download;
mod loader;
mod output;
mod regression;
mod sentiment;
mod types;
mod util;

use consts::{
    ANALYSIS_YEARS, CARBON_FILE, DATA_PATH, DISASTER_FILE, IMAGES_PATH, REDDIT_FILE,
    TEMPERATURE_FILE, WORLD,
};
use loader::LoadReport;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use types::{CommentRecord, DisasterRecord, EmissionRecord, ProcessingSummary, TemperatureRecord};

// Simple in-memory app state so each source is loaded once per session
// but every report can be generated multiple times.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<Datasets>,
}

#[derive(Clone)]
struct Datasets {
    emissions: Vec<EmissionRecord>,
    temperatures: Vec<TemperatureRecord>,
    disasters: Vec<DisasterRecord>,
    bucketed_disasters: Vec<DisasterRecord>,
    comments: Vec<CommentRecord>,
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn data_file(name: &str) -> String {
    Path::new(DATA_PATH).join(name).to_string_lossy().into_owned()
}

/// Handle option [1]: fetch the carbon and temperature sources. The
/// disaster and commentary files ship with the project and are not
/// downloadable.
fn handle_download() {
    println!("Downloading carbon dataset...");
    match download::download_carbon(DATA_PATH) {
        Ok(path) => println!("Saved {}", path),
        Err(e) => eprintln!("Carbon download failed: {}", e),
    }
    println!("Downloading temperature series...");
    match download::download_temperature(DATA_PATH) {
        Ok(path) => println!("Saved {}", path),
        Err(e) => eprintln!("Temperature download failed: {}", e),
    }
    println!();
}

fn print_report(source: &str, report: &LoadReport) {
    println!(
        "{}: {} rows loaded, {} kept, {} parse errors, {} out of window, {} zero-filled",
        source,
        util::format_int(report.total_rows as i64),
        util::format_int(report.kept_rows as i64),
        util::format_int(report.parse_errors as i64),
        util::format_int(report.out_of_window as i64),
        util::format_int(report.zero_filled as i64)
    );
}

/// Handle option [2]: load and clean all four sources, bucket the
/// disaster table, write processed snapshots, and keep everything in the
/// app state for the report options.
fn handle_load() {
    let carbon = loader::load_carbon(&data_file(CARBON_FILE));
    let disasters = loader::load_disasters(&data_file(DISASTER_FILE));
    let temperatures = loader::load_temperature(&data_file(TEMPERATURE_FILE));
    let comments = loader::load_comments(&data_file(REDDIT_FILE));

    let ((emissions, carbon_report), (disaster_rows, disaster_report)) = match (carbon, disasters)
    {
        (Ok(c), Ok(d)) => (c, d),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Failed to load file: {}\n", e);
            return;
        }
    };
    let ((temperature_rows, temperature_report), (comment_rows, comment_report)) =
        match (temperatures, comments) {
            (Ok(t), Ok(c)) => (t, c),
            (Err(e), _) | (_, Err(e)) => {
                eprintln!("Failed to load file: {}\n", e);
                return;
            }
        };

    println!("Processing datasets...");
    print_report("Carbon", &carbon_report);
    print_report("Disasters", &disaster_report);
    print_report("Temperature", &temperature_report);
    print_report("Reddit", &comment_report);
    println!();

    let bucketed = aggregate::bucket_disasters_default(&disaster_rows);

    if let Err(e) = output::write_csv(&data_file("Processed_Carbon.csv"), &emissions) {
        eprintln!("Write error: {}", e);
    }
    if let Err(e) = output::write_csv(&data_file("Processed_Disaster.csv"), &bucketed) {
        eprintln!("Write error: {}", e);
    }
    if let Err(e) = output::write_csv(&data_file("Processed_Temperature.csv"), &temperature_rows) {
        eprintln!("Write error: {}", e);
    }
    if let Err(e) = output::write_csv(&data_file("Processed_Reddit.csv"), &comment_rows) {
        eprintln!("Write error: {}", e);
    }

    let reports = [
        &carbon_report,
        &disaster_report,
        &temperature_report,
        &comment_report,
    ];
    let summary = ProcessingSummary {
        emission_rows: emissions.len(),
        temperature_rows: temperature_rows.len(),
        disaster_rows: disaster_rows.len(),
        comment_rows: comment_rows.len(),
        parse_errors: reports.iter().map(|r| r.parse_errors).sum(),
        out_of_window: reports.iter().map(|r| r.out_of_window).sum(),
        zero_filled: reports.iter().map(|r| r.zero_filled).sum(),
    };
    if let Err(e) = output::write_json(&data_file("data_summary.json"), &summary) {
        eprintln!("Write error: {}", e);
    }

    let world_total: f64 = emissions
        .iter()
        .filter(|r| r.country == WORLD)
        .map(|r| r.value)
        .sum();
    println!(
        "Global emissions in window: {} Mt CO2",
        util::format_number(world_total, 2)
    );
    println!("Processed snapshots written to {}/\n", DATA_PATH);

    let mut state = APP_STATE.lock().unwrap();
    state.data = Some(Datasets {
        emissions,
        temperatures: temperature_rows,
        disasters: disaster_rows,
        bucketed_disasters: bucketed,
        comments: comment_rows,
    });
}

fn loaded_datasets() -> Option<Datasets> {
    let state = APP_STATE.lock().unwrap();
    if state.data.is_none() {
        println!("Error: No data loaded. Please process the datasets first (option 2).\n");
    }
    state.data.clone()
}

/// Handle option [3]: join the monthly aggregates, fit the per-year
/// models, print each coefficient table, and export the combined CSV.
fn handle_regression() {
    let Some(data) = loaded_datasets() else {
        return;
    };

    let disaster_counts = aggregate::monthly_disaster_counts(&data.bucketed_disasters);
    let emission_sums = aggregate::monthly_emission_sums(&data.emissions);
    let anomaly_means = aggregate::monthly_anomaly_means(&data.temperatures);

    let (joined, dropped) = analysis::join_monthly(&disaster_counts, &emission_sums, &anomaly_means);
    println!(
        "Joined {} monthly observations ({} keys dropped by the inner join)\n",
        util::format_int(joined.len() as i64),
        util::format_int(dropped as i64)
    );

    let runs = analysis::run_yearly_models(&joined);
    for run in &runs {
        println!("Model: {} ({})", run.name, run.year);
        match &run.result {
            Ok(fit) => {
                println!("Observations: {}", fit.observations);
                output::preview_table_rows(&analysis::coefficient_table(fit), 10);
            }
            Err(e) => println!("Fit failed: {}\n", e),
        }
    }

    let export = analysis::export_rows(&runs);
    let file = data_file("regression_results.csv");
    if let Err(e) = output::write_csv(&file, &export) {
        eprintln!("Write error: {}", e);
    }
    println!("(Full results exported to {})\n", file);
}

fn prompt_year() -> Option<i32> {
    println!("Select year:");
    for (i, year) in ANALYSIS_YEARS.iter().enumerate() {
        println!("[{}] {}", i + 1, year);
    }
    match read_choice().as_str() {
        "1" => Some(ANALYSIS_YEARS[0]),
        "2" => Some(ANALYSIS_YEARS[1]),
        _ => {
            println!("Invalid choice.\n");
            None
        }
    }
}

/// Handle option [4]: render one (or all) of the four chart views for a
/// chosen year.
fn handle_charts() {
    let Some(data) = loaded_datasets() else {
        return;
    };
    let Some(year) = prompt_year() else {
        return;
    };

    println!("Select chart:");
    println!("[1] Temperature anomalies");
    println!("[2] Carbon emissions");
    println!("[3] Disaster frequency");
    println!("[4] Sentiment vs disaster comparison");
    println!("[5] All of the above");
    let choice = read_choice();

    let render = |label: &str, result: Result<String, Box<dyn std::error::Error>>| match result {
        Ok(path) => println!("{} chart saved to {}", label, path),
        Err(e) => eprintln!("{} chart failed: {}", label, e),
    };

    match choice.as_str() {
        "1" => render(
            "Temperature",
            charts::plot_temperature_anomalies(&data.temperatures, year, IMAGES_PATH),
        ),
        "2" => render(
            "Emissions",
            charts::plot_carbon_emissions(&data.emissions, year, IMAGES_PATH),
        ),
        "3" => render(
            "Disaster frequency",
            charts::plot_disaster_frequency(&data.disasters, year, IMAGES_PATH),
        ),
        "4" => render(
            "Comparison",
            charts::plot_sentiment_disaster_comparison(
                &data.comments,
                &data.bucketed_disasters,
                year,
                IMAGES_PATH,
            ),
        ),
        "5" => {
            render(
                "Temperature",
                charts::plot_temperature_anomalies(&data.temperatures, year, IMAGES_PATH),
            );
            render(
                "Emissions",
                charts::plot_carbon_emissions(&data.emissions, year, IMAGES_PATH),
            );
            render(
                "Disaster frequency",
                charts::plot_disaster_frequency(&data.disasters, year, IMAGES_PATH),
            );
            render(
                "Comparison",
                charts::plot_sentiment_disaster_comparison(
                    &data.comments,
                    &data.bucketed_disasters,
                    year,
                    IMAGES_PATH,
                ),
            );
        }
        _ => println!("Invalid choice.\n"),
    }
    println!();
}

/// Handle option [5]: climate word frequencies over the commentary.
fn handle_word_frequencies() {
    let Some(data) = loaded_datasets() else {
        return;
    };
    let comments: Vec<String> = data.comments.iter().map(|c| c.comment.clone()).collect();
    let rows = sentiment::word_frequencies(&comments);

    output::preview_table(
        "Climate Word Frequencies",
        Some("comments mentioning a climate keyword, stop words removed"),
        &rows,
        20,
    );

    let file = data_file("word_frequencies.csv");
    if let Err(e) = output::write_csv(&file, &rows) {
        eprintln!("Write error: {}", e);
    }
    println!("(Full table exported to {})\n", file);
}

fn main() {
    loop {
        println!("Climate Impact & Perception Report");
        println!("[1] Download source datasets");
        println!("[2] Load and process datasets");
        println!("[3] Regression report");
        println!("[4] Charts");
        println!("[5] Word frequency report");
        println!("[6] Exit\n");
        match read_choice().as_str() {
            "1" => handle_download(),
            "2" => handle_load(),
            "3" => handle_regression(),
            "4" => handle_charts(),
            "5" => handle_word_frequencies(),
            "6" => {
                println!("Exiting the program.");
                break;
            }
            _ => {
                println!("Invalid choice. Please enter 1-6.\n");
            }
        }
    }
}
