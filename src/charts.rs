use log::debug;
use serde_json::json;

use crate::config::FigureConfig;
use crate::data::Table;
use crate::error::Result;
use crate::figure::{
    Axis, BarTrace, Figure, Frame, Layout, Legend, Marker, Mode, ScatterTrace, SizeMode, Slider,
    SliderStep, Trace, Values,
};
use crate::select::YEAR_COLUMNS;
use crate::transform::{
    self, complete_bubble_rows, group_by_country, melt_long, pivot_indicators,
    sort_by_value_desc, BubbleIndicators, BubbleRow,
};

// World Bank indicator codes
pub const POPULATION: &str = "SP.POP.TOTL";
pub const GDP: &str = "NY.GDP.MKTP.KD";
pub const GDP_PER_CAPITA: &str = "NY.GDP.PCAP.KD";
pub const LIFE_EXPECTANCY: &str = "SP.DYN.LE00.IN";

pub const BUBBLE_INDICATORS: BubbleIndicators<'static> = BubbleIndicators {
    gdp_per_capita: GDP_PER_CAPITA,
    life_expectancy: LIFE_EXPECTANCY,
    population: POPULATION,
};

/// Year column appended to the population table from the configured 2020 figures.
pub const POPULATION_EXTRA_YEAR: &str = "2020";

const BUBBLE_SIZE_MAX: f64 = 100.0;

/// Total population per country, 1990-2020.
///
/// `filtered` holds one `SP.POP.TOTL` row per country with the 1990/2000/2010 columns.
pub fn population_figure(filtered: &Table, config: &FigureConfig) -> Result<Figure> {
    let mut table = filtered.clone();
    table.append_keyed_column(
        &config.country_column,
        POPULATION_EXTRA_YEAR,
        &config.population_2020,
    )?;

    let data = line_traces(
        &table,
        &config.country_column,
        &["1990", "2000", "2010", POPULATION_EXTRA_YEAR],
    )?;

    let layout = Layout::new(
        "Change in total Population of the top 10 <br> economies 1990-2020",
        Axis::titled("Year").with_ticks(1990.0, 30.0),
        Axis::titled("Population"),
    );
    Ok(Figure::new(data, layout))
}

/// 2010 GDP per country as a single bar trace, largest first.
pub fn gdp_bar_figure(filtered: &Table, config: &FigureConfig) -> Result<Figure> {
    let mut rows = melt_long(filtered, &config.country_column, &YEAR_COLUMNS)?;
    sort_by_value_desc(&mut rows);
    rows.retain(|row| row.year == 2010);
    debug!("gdp bar: {} countries", rows.len());

    let data = if rows.is_empty() {
        Vec::new()
    } else {
        vec![Trace::Bar(BarTrace {
            x: Values::Labels(rows.iter().map(|r| r.country.clone()).collect()),
            y: Values::Numbers(rows.iter().map(|r| r.value).collect()),
            name: None,
        })]
    };

    let layout = Layout::new(
        "Top 10 GDP as at 2010 (US$)",
        Axis::titled("Country"),
        Axis::titled("GDP in US$"),
    );
    Ok(Figure::new(data, layout))
}

pub fn gdp_per_capita_figure(filtered: &Table, config: &FigureConfig) -> Result<Figure> {
    let data = line_traces(filtered, &config.country_column, &YEAR_COLUMNS)?;
    let layout = Layout::new(
        "Change in GDP Per Capita <br> 1990-2010",
        Axis::titled("Year").with_ticks(1990.0, 20.0),
        Axis::titled("GDP Per Capita (US$)"),
    );
    Ok(Figure::new(data, layout))
}

pub fn life_expectancy_figure(filtered: &Table, config: &FigureConfig) -> Result<Figure> {
    let data = line_traces(filtered, &config.country_column, &["1990", "2010"])?;
    let layout = Layout::new(
        "Life Expectancy at birth 1990-2010",
        Axis::titled("Year").with_ticks(1990.0, 20.0),
        Axis::titled("Life Expectancy in years"),
    );
    Ok(Figure::new(data, layout))
}

/// Animated scatter of life expectancy against GDP per capita, one frame per year.
///
/// `filtered` carries the country and indicator columns plus the year columns for
/// all three bubble indicators. A (country, year) only appears when all three
/// indicators have a value.
pub fn bubble_figure(filtered: &Table, config: &FigureConfig) -> Result<Figure> {
    let melted = transform::melt(
        filtered,
        &[config.country_column.as_str(), config.indicator_column.as_str()],
        &YEAR_COLUMNS,
    )?;
    let rows = complete_bubble_rows(&pivot_indicators(&melted), BUBBLE_INDICATORS);
    debug!("bubble: {} complete (country, year) rows", rows.len());

    let max_population = rows.iter().map(|r| r.population).fold(0.0, f64::max);
    let sizeref = if max_population > 0.0 {
        2.0 * max_population / (BUBBLE_SIZE_MAX * BUBBLE_SIZE_MAX)
    } else {
        1.0
    };

    let mut years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();

    // One fixed slot per country in `data`, seeded with the country's first
    // complete year. Rows are ordered by (country, year).
    let mut countries: Vec<&str> = Vec::new();
    let mut data: Vec<Trace> = Vec::new();
    for row in &rows {
        if countries.last() != Some(&row.country.as_str()) {
            countries.push(row.country.as_str());
            data.push(bubble_trace(row, sizeref));
        }
    }

    let frames: Vec<Frame> = years
        .iter()
        .map(|&year| {
            let in_year: Vec<&BubbleRow> = rows.iter().filter(|r| r.year == year).collect();
            Frame {
                name: year.to_string(),
                data: in_year.iter().map(|r| bubble_trace(r, sizeref)).collect(),
                traces: in_year
                    .iter()
                    .filter_map(|r| countries.iter().position(|c| *c == r.country))
                    .collect(),
            }
        })
        .collect();

    let mut layout = Layout::new(
        "Life Expectancy vs GDP Per Capita for top 10 countries",
        Axis::titled("GDPperCapita_USD").log().with_range(50.0, 10000.0),
        Axis::titled("LifeExpectancy_years").with_range(25.0, 90.0),
    );
    layout.legend = Some(Legend {
        title: "country".to_string(),
    });
    if !frames.is_empty() {
        layout.sliders = vec![year_slider(&years)];
        layout.updatemenus = vec![play_pause_menu()];
    }

    Ok(Figure {
        data,
        layout,
        frames,
    })
}

/// Melt, sort by value descending and group by country into one line per country.
fn line_traces(table: &Table, country_col: &str, value_cols: &[&str]) -> Result<Vec<Trace>> {
    let mut rows = melt_long(table, country_col, value_cols)?;
    sort_by_value_desc(&mut rows);
    let series = group_by_country(&rows);
    debug!("{} line series over {:?}", series.len(), value_cols);

    Ok(series
        .iter()
        .map(|s| Trace::Scatter(ScatterTrace::line(&s.name, s.years(), s.values())))
        .collect())
}

fn bubble_trace(row: &BubbleRow, sizeref: f64) -> Trace {
    Trace::Scatter(ScatterTrace {
        x: Values::Numbers(vec![row.gdp_per_capita]),
        y: Values::Numbers(vec![row.life_expectancy]),
        mode: Mode::Markers,
        name: Some(row.country.clone()),
        legendgroup: Some(row.country.clone()),
        hovertext: Some(vec![row.country.clone()]),
        ids: Some(vec![row.country.clone()]),
        marker: Some(Marker {
            size: vec![row.population],
            sizemode: SizeMode::Area,
            sizeref,
        }),
    })
}

fn year_slider(years: &[i32]) -> Slider {
    Slider {
        active: 0,
        currentvalue: json!({ "prefix": "year=" }),
        steps: years
            .iter()
            .map(|year| SliderStep {
                label: year.to_string(),
                method: "animate".to_string(),
                args: json!([
                    [year.to_string()],
                    {
                        "mode": "immediate",
                        "frame": { "duration": 0, "redraw": false },
                        "transition": { "duration": 0 }
                    }
                ]),
            })
            .collect(),
    }
}

fn play_pause_menu() -> serde_json::Value {
    json!({
        "type": "buttons",
        "showactive": false,
        "buttons": [
            {
                "label": "&#9654;",
                "method": "animate",
                "args": [null, { "frame": { "duration": 500, "redraw": false }, "fromcurrent": true }]
            },
            {
                "label": "&#9724;",
                "method": "animate",
                "args": [[null], { "mode": "immediate", "frame": { "duration": 0, "redraw": false } }]
            }
        ]
    })
}
