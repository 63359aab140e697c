//! Live API tests. Run with: `cargo test --features online --test api_live`
#![cfg(feature = "online")]

use covid_trend::{Category, Client, Error, Query, graph};

#[test]
fn global_history_has_requested_length() {
    let client = Client::new().unwrap();
    let raw = client.fetch_historical(&Query::default()).unwrap();
    assert_eq!(raw.cases.len(), 120);

    let deltas = graph::load(&client, &Query::default(), Category::Confirmed).unwrap();
    assert_eq!(deltas.len(), 119);
}

#[test]
fn country_history() {
    let client = Client::new().unwrap();
    let q = Query {
        country: Some("Germany".into()),
        last_days: 15,
    };
    let deltas = graph::load(&client, &q, Category::Deaths).unwrap();
    assert_eq!(deltas.len(), 14);
}

#[test]
fn unknown_country_is_api_error() {
    let client = Client::new().unwrap();
    let q = Query {
        country: Some("Atlantis".into()),
        last_days: 5,
    };
    assert!(matches!(client.fetch_historical(&q), Err(Error::Api(_))));
}
