use chrono::NaiveDate;
use covid_trend::api::parse_historical;
use covid_trend::transform::delta_series;
use covid_trend::{Category, DeltaPoint, Error};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn parse_sample_json() {
    // Keys deliberately out of order and spanning a year boundary.
    let sample = r#"
    {
      "cases":     {"1/1/21": 170, "12/30/20": 100, "12/31/20": 150},
      "recovered": {"12/30/20": 40, "12/31/20": 60, "1/1/21": 61},
      "deaths":    {"12/31/20": 3, "12/30/20": 2, "1/1/21": 3}
    }
    "#;

    let raw = parse_historical(sample).unwrap();
    assert_eq!(raw.cases.len(), 3);
    assert_eq!(raw.cases.keys().next(), Some(&d(2020, 12, 30)));

    let cases = delta_series(&raw, Category::Confirmed).unwrap();
    assert_eq!(
        cases,
        vec![
            DeltaPoint { date: d(2020, 12, 31), value: 50 },
            DeltaPoint { date: d(2021, 1, 1), value: 20 },
        ]
    );

    let recovered = delta_series(&raw, Category::Recovered).unwrap();
    assert_eq!(recovered.iter().map(|p| p.value).collect::<Vec<_>>(), vec![20, 1]);

    let deaths = delta_series(&raw, Category::Deaths).unwrap();
    assert_eq!(deaths.iter().map(|p| p.value).collect::<Vec<_>>(), vec![1, 0]);
}

#[test]
fn parse_country_payload() {
    let sample = r#"
    {
      "country": "Germany",
      "province": ["mainland"],
      "timeline": {
        "cases": {"3/1/21": 10, "3/2/21": 25},
        "deaths": {"3/1/21": 0, "3/2/21": 1},
        "recovered": {}
      }
    }
    "#;
    let raw = parse_historical(sample).unwrap();
    let deaths = delta_series(&raw, Category::Deaths).unwrap();
    assert_eq!(deaths, vec![DeltaPoint { date: d(2021, 3, 2), value: 1 }]);

    // No recovered counts at all: reported, not coerced to zero.
    assert!(delta_series(&raw, Category::Recovered).is_err());
}

#[test]
fn empty_timeline_gives_empty_series() {
    let raw = parse_historical(r#"{"cases":{},"recovered":{},"deaths":{}}"#).unwrap();
    assert!(raw.is_empty());
    assert!(delta_series(&raw, Category::Confirmed).unwrap().is_empty());
}

#[test]
fn same_day_under_two_spellings_is_a_decode_error() {
    let body = r#"{"cases":{"1/2/21":1,"01/02/21":2},"recovered":{},"deaths":{}}"#;
    assert!(matches!(parse_historical(body), Err(Error::Decode(_))));
}

#[test]
fn malformed_payloads_are_decode_errors() {
    for body in ["", "[]", r#"{"cases": {"13/45/21": 1}}"#, r#"{"cases": {"1/1/21": "many"}}"#] {
        assert!(
            matches!(parse_historical(body), Err(Error::Decode(_))),
            "expected decode error for {body:?}"
        );
    }
}
