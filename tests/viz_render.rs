use chrono::{Duration, NaiveDate};
use covid_trend::viz::{self, ChartOptions};
use covid_trend::{Category, DeltaPoint};
use std::fs;
use std::path::PathBuf;

fn sample_series() -> Vec<DeltaPoint> {
    let start = NaiveDate::from_ymd_opt(2021, 1, 2).unwrap();
    [50, 20, 1200, -30, 880]
        .iter()
        .enumerate()
        .map(|(i, v)| DeltaPoint {
            date: start + Duration::days(i as i64),
            value: *v,
        })
        .collect()
}

fn write_and_check(category: Category, ext: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join(format!("covid_{category}.{ext}"));
    let chart = viz::chart(&sample_series(), category, ChartOptions::default()).unwrap();
    viz::render_to_file(&chart, &path, 800, 480).unwrap();
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "{ext} has content");
}

#[test]
fn every_category_renders_svg_and_png() {
    for category in Category::ALL {
        write_and_check(category, "svg");
        write_and_check(category, "png");
    }
}

#[test]
fn svg_uses_category_colour_and_axis_labels() {
    let chart = viz::chart(&sample_series(), Category::Recovered, ChartOptions::default()).unwrap();
    let svg = viz::render_svg(&chart, 800, 480).unwrap();
    assert!(svg.contains("#7DD71D") || svg.contains("#7dd71d"));
    assert!(svg.contains("1.2k") || svg.contains("1k"));
    assert!(svg.contains("01/0"));
}

#[test]
fn rgb_buffer_matches_size() {
    let options = ChartOptions {
        show_legend: true,
        point_radius: 3,
        y_grid_lines: true,
        ..ChartOptions::default().with_title("Daily deaths")
    };
    let chart = viz::chart(&sample_series(), Category::Deaths, options).unwrap();
    let rgb = viz::render_rgb(&chart, 320, 200).unwrap();
    assert_eq!(rgb.len(), 320 * 200 * 3);
    // Background is painted white.
    assert_eq!(&rgb[..3], &[255, 255, 255]);
}
