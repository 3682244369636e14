use proptest::prelude::*;
use racepred::models::{Distance, Duration, PerformanceRecord};
use racepred::{cameron, predict_all, purdy_least_squares, purdy_standard, riegel};

fn record(meters: f64, seconds: f64) -> PerformanceRecord {
    PerformanceRecord::new(
        Distance::meters(meters).unwrap(),
        Duration::seconds(seconds).unwrap(),
    )
}

fn relative(a: f64, b: f64) -> f64 {
    ((a - b) / b).abs()
}

proptest! {
    #[test]
    fn test_riegel_same_distance_is_exact(
        meters in 100.0f64..100_000.0,
        seconds in 10.0f64..30_000.0
    ) {
        let predicted = riegel(&record(meters, seconds), Distance::meters(meters).unwrap()).unwrap();
        prop_assert_eq!(predicted.as_seconds(), seconds);
    }

    #[test]
    fn test_riegel_depends_only_on_distance_ratio(
        meters in 400.0f64..20_000.0,
        seconds in 60.0f64..7_200.0,
        scale in 0.1f64..10.0
    ) {
        let base = riegel(&record(meters, seconds), Distance::meters(2.0 * meters).unwrap()).unwrap();
        let scaled = riegel(
            &record(meters * scale, seconds),
            Distance::meters(2.0 * meters * scale).unwrap(),
        )
        .unwrap();
        prop_assert!(relative(scaled.as_seconds(), base.as_seconds()) < 1e-9);
    }

    #[test]
    fn test_closed_form_models_identity(
        meters in 200.0f64..80_000.0,
        velocity in 3.0f64..8.0
    ) {
        let seconds = meters / velocity;
        let perf = record(meters, seconds);
        let target = Distance::meters(meters).unwrap();

        let standard = purdy_standard(&perf, target).unwrap();
        let least_squares = purdy_least_squares(&perf, target).unwrap();
        let regression = cameron(&perf, target).unwrap();

        prop_assert!(relative(standard.as_seconds(), seconds) < 1e-6);
        prop_assert!(relative(least_squares.as_seconds(), seconds) < 1e-6);
        prop_assert!(relative(regression.time.as_seconds(), seconds) < 1e-6);
    }

    #[test]
    fn test_longer_targets_take_longer(
        meters in 1_500.0f64..20_000.0,
        velocity in 3.5f64..6.0,
        stretch in 1.2f64..2.0
    ) {
        let perf = record(meters, meters / velocity);
        let near = Distance::meters(meters * stretch).unwrap();
        let far = Distance::meters(meters * stretch * stretch).unwrap();

        prop_assert!(purdy_standard(&perf, near).unwrap() < purdy_standard(&perf, far).unwrap());
        prop_assert!(purdy_least_squares(&perf, near).unwrap() < purdy_least_squares(&perf, far).unwrap());
        prop_assert!(riegel(&perf, near).unwrap() < riegel(&perf, far).unwrap());
    }

    #[test]
    fn test_average_is_mean_of_five(
        meters in 1_500.0f64..42_195.0,
        velocity in 3.5f64..6.0,
        target in 1_500.0f64..42_195.0
    ) {
        let report = predict_all(
            &record(meters, meters / velocity),
            Distance::meters(target).unwrap(),
        )
        .unwrap();

        let predictions = report.predictions();
        let sum: f64 = predictions.iter().map(|(_, t)| t.as_seconds()).sum();
        prop_assert!((report.average.as_seconds() - sum / 5.0).abs() < 1e-9);

        let min = predictions.iter().map(|(_, t)| t.as_seconds()).fold(f64::INFINITY, f64::min);
        let max = predictions.iter().map(|(_, t)| t.as_seconds()).fold(0.0, f64::max);
        prop_assert!(report.average.as_seconds() >= min && report.average.as_seconds() <= max);
        prop_assert!(report.spread_seconds >= 0.0);
    }
}
