use insta::assert_snapshot;
use price_history_chart::domain::chart::Size;
use price_history_chart::domain::config::ChartConfig;
use price_history_chart::domain::errors::AppError;
use price_history_chart::presentation::svg_snapshot;

const HISTORY: &str = r#"[
    {"timestamp": 0, "open": 10, "high": 12, "low": 9, "close": 12, "ma10": 10, "bb_upper": 20, "bb_lower": 0},
    {"timestamp": 60000, "open": 12, "high": 13, "low": 10, "close": 11, "ma10": 11, "bb_upper": 20, "bb_lower": 0},
    {"timestamp": 120000, "open": 11, "high": 11, "low": 11, "close": 11, "ma10": 11, "bb_upper": 20, "bb_lower": 0}
]"#;

/// 440x270 leaves a 300x200 content box with the default margins.
fn render() -> String {
    svg_snapshot(HISTORY, Size::new(440.0, 270.0), &ChartConfig::default()).unwrap()
}

fn layer<'a>(svg: &'a str, name: &str) -> Vec<&'a str> {
    let open = format!("<g class=\"{name}\">");
    svg.lines()
        .skip_while(|line| *line != open)
        .skip(1)
        .take_while(|line| *line != "</g>")
        .collect()
}

#[test]
fn document_frame() {
    let svg = render();
    let head: Vec<&str> = svg.lines().take(3).collect();
    assert_snapshot!(head.join("\n"), @r##"
    <svg xmlns="http://www.w3.org/2000/svg" width="440" height="270" viewBox="0 0 440 270" font-family="sans-serif">
    <rect width="440" height="270" fill="#1a1a1a"/>
    <g transform="translate(70,30)">
    "##);
    assert!(svg.ends_with("</g>\n</svg>\n"));
}

#[test]
fn data_layer_candles_and_bands() {
    let svg = render();
    let data: Vec<&str> = layer(&svg, "data").into_iter().filter(|l| !l.contains("ma-line")).collect();
    assert_snapshot!(data.join("\n"), @r##"
    <line class="candle stem up" x1="0" y1="80" x2="0" y2="110" stroke="#26a69a" stroke-width="1"/>
    <line class="candle stem down" x1="150" y1="70" x2="150" y2="100" stroke="#ef5350" stroke-width="1"/>
    <line class="candle stem up" x1="300" y1="90" x2="300" y2="90" stroke="#26a69a" stroke-width="1"/>
    <rect class="candle body up" x="-35" y="80" width="70" height="20" fill="#26a69a"/>
    <rect class="candle body down" x="115" y="80" width="70" height="10" fill="#ef5350"/>
    <rect class="candle body up" x="265" y="90" width="70" height="0" fill="#26a69a"/>
    <path class="bb-upper" d="M0,0L150,0L300,0" fill="none" stroke="#5dade2" stroke-width="1"/>
    <path class="bb-lower" d="M0,200L150,200L300,200" fill="none" stroke="#5dade2" stroke-width="1"/>
    "##);
}

#[test]
fn moving_average_is_a_cubic_path() {
    let svg = render();
    let ma = layer(&svg, "data").into_iter().find(|l| l.contains("ma-line")).unwrap();
    assert!(ma.contains("d=\"M0,100C"), "{ma}");
    assert_eq!(ma.matches('C').count(), 2, "{ma}");
    assert!(ma.contains("stroke-width=\"1.5\""), "{ma}");
}

#[test]
fn annotations_show_the_latest_close_and_caption() {
    let svg = render();
    let annotations = layer(&svg, "annotations");
    assert!(annotations.iter().any(|l| l.contains("current-price-line") && l.contains("stroke-dasharray=\"4,4\"")));
    assert!(annotations.iter().any(|l| l.contains("current-price-text") && l.ends_with(">11.000</text>")));
    assert!(annotations.iter().any(|l| l.contains("caption") && l.contains("Indicators: MA(10), BB(20)")));
}

#[test]
fn rejected_document_yields_no_svg() {
    let error = svg_snapshot("[{\"timestamp\": 0}]", Size::new(440.0, 270.0), &ChartConfig::default())
        .unwrap_err();
    assert!(matches!(error, AppError::Validation(_)), "{error}");
}
