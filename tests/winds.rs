use std::fs;

use spanwise::{
    PressureLevelArchive, WindError, WindProvider, WindQuery, pressure_altitude_hpa,
};

#[test]
fn pressure_altitude_follows_the_standard_atmosphere() {
    assert!(
        (pressure_altitude_hpa(0.0) - 1013.25).abs() < 1e-9,
        "sea level = {} hPa",
        pressure_altitude_hpa(0.0)
    );
    assert!(
        (pressure_altitude_hpa(12_000.0) - 644.408).abs() < 0.01,
        "12000 ft = {} hPa",
        pressure_altitude_hpa(12_000.0)
    );
    assert!(
        (pressure_altitude_hpa(16_000.0) - 549.152).abs() < 0.01,
        "16000 ft = {} hPa",
        pressure_altitude_hpa(16_000.0)
    );
    assert!(pressure_altitude_hpa(16_000.0) < pressure_altitude_hpa(12_000.0));
}

#[test]
fn queries_select_the_nearest_shipped_level() {
    let archive = PressureLevelArchive::new("data/winds");
    let high = archive
        .wind_speed(&WindQuery {
            latitude_deg: 35.0,
            percentile: 90,
            altitude_ft: 16_000.0,
        })
        .expect("16000 ft lookup");
    assert_eq!(high.level_hpa, 550);
    assert!(
        (high.speed_m_s - 30.6).abs() < 1e-9,
        "speed = {} m/s",
        high.speed_m_s
    );
    assert!((high.pressure_hpa - 549.152).abs() < 0.01);

    let low = archive
        .wind_speed(&WindQuery {
            latitude_deg: 35.0,
            percentile: 90,
            altitude_ft: 12_000.0,
        })
        .expect("12000 ft lookup");
    assert_eq!(low.level_hpa, 650);
    assert!(
        (low.speed_m_s - 25.9).abs() < 1e-9,
        "speed = {} m/s",
        low.speed_m_s
    );
}

#[test]
fn pressures_between_levels_are_rejected() {
    let archive = PressureLevelArchive::new("data/winds");
    // 14000 ft sits 45 hPa from either stored level.
    let err = archive
        .wind_speed(&WindQuery {
            latitude_deg: 35.0,
            percentile: 90,
            altitude_ft: 14_000.0,
        })
        .unwrap_err();
    assert!(matches!(err, WindError::NoMatchingLevel { .. }), "got {err}");
    let err = archive
        .wind_speed(&WindQuery {
            latitude_deg: 35.0,
            percentile: 90,
            altitude_ft: 0.0,
        })
        .unwrap_err();
    assert!(matches!(err, WindError::NoMatchingLevel { .. }), "got {err}");
}

#[test]
fn synthetic_archives_resolve_rows_and_columns() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("wind550.csv"),
        "Latitude,perc80,perc90\n40,10.0,12.5\n45,11.0,13.75\n",
    )
    .expect("write csv");
    let archive = PressureLevelArchive::new(dir.path());

    let sample = archive
        .wind_speed(&WindQuery {
            latitude_deg: 45.0,
            percentile: 80,
            altitude_ft: 16_000.0,
        })
        .expect("lookup");
    assert!((sample.speed_m_s - 11.0).abs() < 1e-9);

    let err = archive
        .wind_speed(&WindQuery {
            latitude_deg: 50.0,
            percentile: 80,
            altitude_ft: 16_000.0,
        })
        .unwrap_err();
    assert!(matches!(err, WindError::UnknownLatitude { .. }), "got {err}");

    let err = archive
        .wind_speed(&WindQuery {
            latitude_deg: 45.0,
            percentile: 75,
            altitude_ft: 16_000.0,
        })
        .unwrap_err();
    match err {
        WindError::MissingPercentile { column, .. } => assert_eq!(column, "perc75"),
        other => panic!("got {other}"),
    }
}

#[test]
fn custom_level_sets_narrow_the_archive() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("wind550.csv"),
        "Latitude,perc90\n45,13.75\n",
    )
    .expect("write csv");
    let archive = PressureLevelArchive::with_levels(dir.path(), vec![550]);
    // 12000 ft resolves to 650 hPa, which this archive does not carry.
    let err = archive
        .wind_speed(&WindQuery {
            latitude_deg: 45.0,
            percentile: 90,
            altitude_ft: 12_000.0,
        })
        .unwrap_err();
    assert!(matches!(err, WindError::NoMatchingLevel { .. }), "got {err}");
}

#[test]
fn archives_answer_through_the_provider_trait() {
    let archive = PressureLevelArchive::new("data/winds");
    let provider: &dyn WindProvider = &archive;
    let sample = provider
        .wind_speed(&WindQuery {
            latitude_deg: 40.0,
            percentile: 85,
            altitude_ft: 16_000.0,
        })
        .expect("lookup");
    assert!(
        (sample.speed_m_s - 31.0).abs() < 1e-9,
        "speed = {} m/s",
        sample.speed_m_s
    );
}
