use std::path::PathBuf;

use sentiplot_core::control::{ControlError, SentiplotControlPlane};
use sentiplot_core::display::PlotDisplay;
use sentiplot_core::forum::{ForumConfig, RedditClient};
use sentiplot_core::render::{NO_LINKS_PLACEHOLDER, PlotRenderer};
use sentiplot_model::{Constraint, RawLink, RawRecord};

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sentiplot-it-{name}-{}", std::process::id()))
}

fn control_plane(dir: PathBuf) -> SentiplotControlPlane {
    let forum = RedditClient::new(ForumConfig::new(None, None)).expect("forum client");
    let display = PlotDisplay::new(dir).with_open_browser(false);
    SentiplotControlPlane::new(forum, PlotRenderer::default(), display)
}

fn raw(symbol: &str, sentiment: f64, presence: f64) -> RawRecord {
    RawRecord {
        symbol: symbol.to_string(),
        sentiment,
        presence,
        summary: format!("Notes on {symbol}."),
        links: Vec::new(),
    }
}

fn tesla() -> RawRecord {
    RawRecord {
        symbol: "Tesla Inc. (TSLA)".to_string(),
        sentiment: 0.42,
        presence: 0.77,
        summary: "Bullish on deliveries".to_string(),
        links: vec![RawLink {
            url: "https://x.com/p/1".to_string(),
            title: "Q3 earnings beat".to_string(),
        }],
    }
}

#[tokio::test]
async fn tesla_scenario_end_to_end() {
    let dir = scratch_dir("tesla");
    let control = control_plane(dir.clone());

    let report = control.create_plot(vec![tesla()]).await.expect("plot should render");

    assert_eq!(report.datasets, 1);
    assert_eq!(report.symbols, ["Tesla Inc. (TSLA)"]);
    let html = std::fs::read_to_string(&report.path).expect("plot file should exist");
    assert!(html.contains("Tesla Inc. (TSLA)"));
    assert!(html.contains("0.77"));
    assert!(html.contains("Q3 earnings beat"));
    assert!(html.contains("https://x.com/p/1"));
    assert!(html.contains("Bullish on deliveries"));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn tesla_scenario_yields_one_dataset() {
    let control = control_plane(scratch_dir("tesla-datasets"));
    let record = tesla().validate().expect("valid record");

    let datasets = control.renderer().build_datasets(&[record]);

    assert_eq!(datasets.len(), 1);
    assert_eq!(datasets[0].label, "Tesla Inc. (TSLA)");
    assert_eq!(datasets[0].data.len(), 1);
    assert!((datasets[0].data[0].x - 0.42).abs() < f64::EPSILON);
    assert!((datasets[0].data[0].y - 0.77).abs() < f64::EPSILON);

    let json = serde_json::to_value(&datasets[0]).expect("serialize");
    assert_eq!(json["backgroundColor"], "#FF6384");
    assert_eq!(json["borderColor"], "#FF6384");
    assert!((json["pointRadius"].as_f64().expect("radius") - 15.4).abs() < 1e-9);
    assert!((json["pointHoverRadius"].as_f64().expect("hover") - 18.4).abs() < 1e-9);
}

#[test]
fn records_keep_their_order_in_datasets_and_panels() {
    let control = control_plane(scratch_dir("order"));
    let raws = vec![
        raw("Zeta Corp (ZZZ)", 0.1, 0.9),
        raw("Alpha Corp (AAA)", -0.4, 0.2),
        raw("Mid Corp (MMM)", 0.0, 0.5),
    ];

    let (document, symbols) = control.render_plot(raws).expect("render");

    assert_eq!(symbols, ["Zeta Corp (ZZZ)", "Alpha Corp (AAA)", "Mid Corp (MMM)"]);
    let html = document.as_str();
    let panels = html
        .split("Stock Analysis Details")
        .nth(1)
        .expect("detail section");
    let z = panels.find("Zeta Corp (ZZZ)").expect("zeta panel");
    let a = panels.find("Alpha Corp (AAA)").expect("alpha panel");
    let m = panels.find("Mid Corp (MMM)").expect("mid panel");
    assert!(z < a && a < m);

    let script = html.split("datasets: ").nth(1).expect("datasets");
    let z = script.find("ZZZ").expect("zeta dataset");
    let a = script.find("AAA").expect("alpha dataset");
    let m = script.find("MMM").expect("mid dataset");
    assert!(z < a && a < m);
}

#[test]
fn empty_batch_renders_empty_chart() {
    let control = control_plane(scratch_dir("empty"));

    let (document, symbols) = control.render_plot(Vec::new()).expect("empty render");

    assert!(symbols.is_empty());
    assert_eq!(document.dataset_count(), 0);
    assert!(document.as_str().contains("datasets: []"));
    assert!(!document.as_str().contains("class=\"stock-box\""));
}

#[test]
fn record_without_links_shows_placeholder() {
    let control = control_plane(scratch_dir("no-links"));

    let (document, _) = control
        .render_plot(vec![raw("Apple Inc. (AAPL)", 0.2, 0.3)])
        .expect("render");

    assert!(document.as_str().contains(NO_LINKS_PLACEHOLDER));
}

#[tokio::test]
async fn invalid_batch_is_rejected_before_anything_is_written() {
    let dir = scratch_dir("invalid");
    let control = control_plane(dir.clone());

    let err = control
        .create_plot(vec![tesla(), raw("Apple Inc. (aapl)", 0.2, 1.5)])
        .await
        .expect_err("batch should be rejected");

    let errors = match err {
        ControlError::Validation(errors) => errors,
        other => panic!("expected validation error, got {other}"),
    };
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.for_field("data[1].symbol").map(|e| e.constraint),
        Some(Constraint::SymbolPattern)
    );
    assert_eq!(
        errors.for_field("data[1].presence").map(|e| e.value.as_str()),
        Some("1.5")
    );
    assert!(!dir.exists());
}
