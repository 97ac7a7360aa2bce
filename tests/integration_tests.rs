use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;
use wdi_figures::select::{default_keep_columns, select};
use wdi_figures::{return_figures, FigureConfig, FigureError};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test").join(name)
}

/// Run the binary against a dataset and parse its stdout as JSON
fn run_wdi_figures(args: &[&str]) -> Result<Value, String> {
    let output = Command::new(env!("CARGO_BIN_EXE_wdi-figures"))
        .args(args)
        .output()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    if output.status.success() {
        serde_json::from_slice(&output.stdout).map_err(|e| format!("Invalid JSON: {}", e))
    } else {
        Err(String::from_utf8_lossy(&output.stderr).to_string())
    }
}

fn figures_json() -> Vec<Value> {
    let figures = return_figures(&fixture("adi_sample.csv"), &FigureConfig::default()).unwrap();
    figures
        .iter()
        .map(|f| serde_json::to_value(f).unwrap())
        .collect()
}

fn trace_names(figure: &Value) -> Vec<String> {
    figure["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_select_subset_of_roster_and_indicators() {
    let config = FigureConfig::default();
    let table = select(
        &fixture("adi_sample.csv"),
        &["SP.POP.TOTL", "NY.GDP.MKTP.KD"],
        &["country_name_attr", "indicator_code", "2010"],
        &config,
    )
    .unwrap();

    assert_eq!(table.len(), 20);
    for country in table.column("country_name_attr").unwrap() {
        assert!(config.in_roster(country), "{country} not in roster");
    }
    for code in table.column("indicator_code").unwrap() {
        assert!(["SP.POP.TOTL", "NY.GDP.MKTP.KD"].contains(&code));
    }
}

#[test]
fn test_select_absent_indicator() {
    let config = FigureConfig::default();
    let table = select(
        &fixture("adi_sample.csv"),
        &["EN.ATM.CO2E.KT"],
        &default_keep_columns(&config),
        &config,
    )
    .unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_five_figures_in_order() {
    let figures = figures_json();
    assert_eq!(figures.len(), 5);

    let titles: Vec<&str> = figures
        .iter()
        .map(|f| f["layout"]["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Change in total Population of the top 10 <br> economies 1990-2020",
            "Top 10 GDP as at 2010 (US$)",
            "Change in GDP Per Capita <br> 1990-2010",
            "Life Expectancy at birth 1990-2010",
            "Life Expectancy vs GDP Per Capita for top 10 countries",
        ]
    );
}

#[test]
fn test_population_figure_from_file() {
    let figures = figures_json();
    let population = &figures[0];

    let names = trace_names(population);
    assert_eq!(names.len(), 10);
    assert_eq!(&names[..3], &["Nigeria", "Ethiopia", "Egypt, Arab Rep."]);

    // the duplicate Nigeria row further down the file is ignored
    let nigeria = &population["data"][0];
    assert_eq!(nigeria["x"], serde_json::json!([1990, 2000, 2010, 2020]));
    assert_eq!(nigeria["y"][0], 95_200_000.0);
    assert_eq!(nigeria["y"][3], 206_139_589.0);
}

#[test]
fn test_gdp_bar_from_file() {
    let figures = figures_json();
    let bar = &figures[1]["data"][0];

    assert_eq!(bar["type"], "bar");
    let x: Vec<&str> = bar["x"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(x.len(), 10);
    assert_eq!(&x[..3], &["South Africa", "Nigeria", "Egypt, Arab Rep."]);
    assert_eq!(x[9], "Ethiopia");

    let y: Vec<f64> = bar["y"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    assert!(y.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_bubble_skips_incomplete_years() {
    let figures = figures_json();
    let frames = figures[4]["frames"].as_array().unwrap();
    assert_eq!(frames.len(), 3);

    let count = |i: usize| frames[i]["data"].as_array().unwrap().len();
    assert_eq!(count(0), 10);
    assert_eq!(count(1), 9);
    assert_eq!(count(2), 10);

    let names_2000: Vec<&str> = frames[1]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(!names_2000.contains(&"Ethiopia"));
    assert!(!names_2000.contains(&"Zambia"));
}

#[test]
fn test_json_records_input() {
    let figures = return_figures(&fixture("records.json"), &FigureConfig::default()).unwrap();

    assert_eq!(figures[0].data.len(), 2);
    for figure in &figures[1..] {
        assert!(figure.data.is_empty());
    }
}

#[test]
fn test_bulk_year_labels() {
    let figures = return_figures(&fixture("bulk_labels.csv"), &FigureConfig::default()).unwrap();
    let figures: Vec<Value> = figures
        .iter()
        .map(|f| serde_json::to_value(f).unwrap())
        .collect();

    assert_eq!(trace_names(&figures[0]), vec!["Nigeria", "Kenya"]);
    assert_eq!(
        figures[0]["data"][0]["x"],
        serde_json::json!([1990, 2000, 2010, 2020])
    );
    assert_eq!(figures[1]["data"][0]["x"], serde_json::json!(["Nigeria", "Kenya"]));
    assert_eq!(figures[3]["data"][1]["x"], serde_json::json!([1990, 2010]));

    let frames = figures[4]["frames"].as_array().unwrap();
    assert_eq!(frames.len(), 3);
    for frame in frames {
        assert_eq!(frame["traces"], serde_json::json!([0, 1]));
    }
    assert_eq!(trace_names(&figures[4]), vec!["Kenya", "Nigeria"]);
}

#[test]
fn test_config_from_file() {
    let config = FigureConfig::from_json_file(&fixture("renamed_config.json")).unwrap();
    assert_eq!(config.country_column, "Country Name");
    assert_eq!(config.indicator_column, "Indicator Code");
    assert_eq!(config.roster, vec!["Kenya", "Ghana"]);
    // not in the file, so the built-in figures apply
    assert_eq!(config.population_2020, FigureConfig::default().population_2020);

    let err = FigureConfig::from_json_file(&fixture("nope.json")).unwrap_err();
    assert!(matches!(err, FigureError::Io { .. }));
}

#[test]
fn test_renamed_columns_need_config() {
    let err = return_figures(&fixture("renamed_columns.csv"), &FigureConfig::default()).unwrap_err();
    assert!(matches!(err, FigureError::MissingColumn(c) if c == "country_name_attr"));
}

#[test]
fn test_missing_column_error() {
    let err = return_figures(&fixture("missing_column.csv"), &FigureConfig::default()).unwrap_err();
    assert!(matches!(err, FigureError::MissingColumn(c) if c == "2010"));
}

#[test]
fn test_missing_file_error() {
    let err = return_figures(&fixture("nope.csv"), &FigureConfig::default()).unwrap_err();
    assert!(matches!(err, FigureError::Io { .. }));
}

#[test]
fn test_end_to_end_cli() {
    let path = fixture("adi_sample.csv");
    let result = run_wdi_figures(&[path.to_str().unwrap()]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());

    let figures = result.unwrap();
    assert_eq!(figures.as_array().unwrap().len(), 5);
    assert_eq!(figures[4]["layout"]["xaxis"]["type"], "log");
}

#[test]
fn test_end_to_end_missing_column() {
    let path = fixture("missing_column.csv");
    let result = run_wdi_figures(&[path.to_str().unwrap()]);
    assert!(result.is_err(), "Should have failed with column not found");
    assert!(result.unwrap_err().contains("Column '2010' not found"));
}

#[test]
fn test_end_to_end_config_renamed_columns() {
    let dataset = fixture("renamed_columns.csv");
    let config = fixture("renamed_config.json");
    let result = run_wdi_figures(&[
        dataset.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());

    let figures = result.unwrap();
    let figures = figures.as_array().unwrap();
    assert_eq!(figures.len(), 5);

    // Kenya's 2020 figure outranks everything Ghana has
    assert_eq!(trace_names(&figures[0]), vec!["Kenya", "Ghana"]);
    assert_eq!(figures[0]["data"][0]["y"][3], 53_771_296.0);
    assert_eq!(figures[1]["data"][0]["x"], serde_json::json!(["Kenya", "Ghana"]));
    assert_eq!(figures[2]["data"].as_array().unwrap().len(), 2);
    assert_eq!(figures[3]["data"].as_array().unwrap().len(), 2);
    assert_eq!(trace_names(&figures[4]), vec!["Ghana", "Kenya"]);
    assert_eq!(figures[4]["frames"].as_array().unwrap().len(), 3);
}

#[test]
fn test_end_to_end_missing_config() {
    let dataset = fixture("renamed_columns.csv");
    let config = fixture("nope.json");
    let result = run_wdi_figures(&[
        dataset.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(result.is_err(), "Should have failed to load the config");
    assert!(result.unwrap_err().contains("Failed to load config"));
}
