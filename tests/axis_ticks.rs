use insta::{assert_json_snapshot, assert_snapshot};
use price_history_chart::domain::chart::{DEFAULT_TICK_COUNT, LinearScale, TimeScale};
use price_history_chart::time_utils::format_time_tick;

fn value_labels(domain: (f64, f64)) -> Vec<String> {
    LinearScale::new(domain, (500.0, 0.0))
        .tick_labels(DEFAULT_TICK_COUNT)
        .into_iter()
        .map(|(_, label)| label)
        .collect()
}

fn time_labels(domain: (f64, f64)) -> String {
    TimeScale::new(domain, (0.0, 800.0))
        .ticks(DEFAULT_TICK_COUNT)
        .into_iter()
        .map(format_time_tick)
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn price_labels_use_the_step_precision() {
    assert_json_snapshot!(value_labels((147.13, 147.61)), @r#"
    [
      "147.15",
      "147.20",
      "147.25",
      "147.30",
      "147.35",
      "147.40",
      "147.45",
      "147.50",
      "147.55",
      "147.60"
    ]
    "#);
}

#[test]
fn large_prices_are_grouped() {
    assert_snapshot!(value_labels((0.0, 12_000.0)).join(" "), @"0 1,000 2,000 3,000 4,000 5,000 6,000 7,000 8,000 9,000 10,000 11,000 12,000");
}

#[test]
fn negative_prices_use_a_typographic_minus() {
    assert_eq!(value_labels((-2.0, 2.0)), vec![
        "\u{2212}2.0", "\u{2212}1.5", "\u{2212}1.0", "\u{2212}0.5", "0.0", "0.5", "1.0", "1.5", "2.0"
    ]);
}

#[test]
fn two_minutes_tick_every_fifteen_seconds() {
    assert_snapshot!(time_labels((0.0, 120_000.0)), @"1970 :15 :30 :45 12:01 :15 :30 :45 12:02");
}

#[test]
fn an_afternoon_ticks_hourly() {
    // 2024-03-05 12:00 .. 22:00 UTC
    let start = 1_709_640_000_000.0;
    assert_snapshot!(
        time_labels((start, start + 10.0 * 3_600_000.0)),
        @"12 PM 01 PM 02 PM 03 PM 04 PM 05 PM 06 PM 07 PM 08 PM 09 PM 10 PM"
    );
}

#[test]
fn zoomed_in_axis_shows_finer_ticks() {
    let full = TimeScale::new((0.0, 3_600_000.0), (0.0, 800.0));
    let coarse = full.ticks(DEFAULT_TICK_COUNT);
    let zoomed = full.with_domain((0.0, 3_600_000.0 / 40.0)).ticks(DEFAULT_TICK_COUNT);
    assert!(coarse.windows(2).all(|w| w[1] - w[0] == 5 * 60_000));
    assert!(zoomed.windows(2).all(|w| w[1] - w[0] == 15_000));
    assert!(zoomed.len() > coarse.len() / 2);
}
