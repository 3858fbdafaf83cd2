use spanwise::case::{CaseError, run_case, targets_from_config};
use spanwise::{
    CaseConfig, SpacingConfig, StationConfig, TrimValue, TrimValueConfig, WingConfig, load_case,
    load_wing,
};

fn tapered_wing() -> WingConfig {
    WingConfig {
        name: "tapered-12".to_string(),
        stations: vec![
            StationConfig {
                xle_m: 0.0,
                y_m: 0.0,
                z_m: 0.0,
                chord_m: 0.22,
                twist_deg: 0.0,
                alpha0_deg: 0.0,
            },
            StationConfig {
                xle_m: 0.0,
                y_m: 1.0,
                z_m: 0.0,
                chord_m: 0.11,
                twist_deg: 0.0,
                alpha0_deg: 0.0,
            },
        ],
        reference_area_m2: Some(0.33),
        tip_height_m: None,
        axis_fraction: None,
    }
}

fn cruise_case(panels: usize) -> CaseConfig {
    CaseConfig {
        name: "cruise".to_string(),
        alpha_deg: TrimValueConfig::Solved,
        lift: TrimValueConfig::Specified { value: 1.1 },
        sideslip_deg: 0.0,
        roll_rate: TrimValueConfig::Specified { value: 0.0 },
        roll_moment: TrimValueConfig::Solved,
        yaw_rate: TrimValueConfig::Specified { value: 0.0 },
        yaw_moment: TrimValueConfig::Solved,
        panels,
        spacing: SpacingConfig::Cosine,
        max_iterations: 20,
        tolerance: 1e-6,
        relaxation: 0.8,
    }
}

#[test]
fn cruise_case_trims_the_reference_wing() {
    let report = run_case(&tapered_wing(), &cruise_case(16)).expect("trim case");
    assert_eq!(report.wing, "tapered-12");
    assert_eq!(report.case, "cruise");
    assert_eq!(report.panels, 16);
    assert!(
        (report.aspect_ratio - 4.0 / 0.33).abs() < 1e-9,
        "aspect ratio = {}",
        report.aspect_ratio
    );
    assert!(
        (report.area_ratio - 0.33).abs() < 1e-9,
        "area ratio = {}",
        report.area_ratio
    );
    let solution = &report.solution;
    assert!(solution.converged, "residual = {}", solution.residual);
    assert!(
        (solution.coefficients.cl - 1.1).abs() < 1e-5,
        "CL = {}",
        solution.coefficients.cl
    );
    let alpha_deg = solution.state.alpha.to_degrees();
    assert!(
        (alpha_deg - 12.630).abs() < 0.05,
        "trimmed alpha = {alpha_deg} deg"
    );
    assert_eq!(solution.loading.len(), 16);
}

#[test]
fn shipped_manifests_reproduce_the_in_code_case() {
    let wing = load_wing("data/wings/tapered.yaml").expect("wing manifest");
    let case = load_case("data/cases/cruise.yaml").expect("case manifest");
    assert_eq!(case.panels, 16);
    let report = run_case(&wing, &case).expect("trim case");
    assert_eq!(report.wing, "tapered-12");
    assert!(report.solution.converged);
    assert!(
        (report.solution.coefficients.cl - 1.1).abs() < 1e-5,
        "CL = {}",
        report.solution.coefficients.cl
    );
    let alpha_deg = report.solution.state.alpha.to_degrees();
    assert!(
        (alpha_deg - 12.630).abs() < 0.05,
        "trimmed alpha = {alpha_deg} deg"
    );
}

#[test]
fn washout_manifest_flies_straight_at_fixed_incidence() {
    let wing = load_wing("data/wings/washout.yaml").expect("wing manifest");
    let case = load_case("data/cases/fixed_alpha.yaml").expect("case manifest");
    let report = run_case(&wing, &case).expect("trim case");
    assert!(
        (report.normalize.height_scale - 1.25).abs() < 1e-12,
        "height scale = {}",
        report.normalize.height_scale
    );
    assert!(
        (report.normalize.aspect_ratio - 9.0).abs() < 1e-9,
        "aspect ratio = {}",
        report.normalize.aspect_ratio
    );
    let solution = &report.solution;
    // Every axis is specified, so the first pass is already converged.
    assert!(solution.converged);
    assert_eq!(solution.iterations, 1);
    assert!(
        (solution.coefficients.cl - 0.51609).abs() < 2e-3,
        "CL = {}",
        solution.coefficients.cl
    );
    assert!(
        (solution.coefficients.cdi - 0.009495).abs() < 2e-4,
        "CDi = {}",
        solution.coefficients.cdi
    );
    // Symmetric wing in symmetric flight carries no lateral moments.
    assert!(
        solution.coefficients.roll_moment.abs() < 1e-12,
        "Cr = {}",
        solution.coefficients.roll_moment
    );
    assert!(
        solution.coefficients.yaw_moment.abs() < 1e-12,
        "Cn = {}",
        solution.coefficients.yaw_moment
    );
}

#[test]
fn toml_case_manifests_load_like_yaml() {
    let case = load_case("data/cases/roll_damping.toml").expect("case manifest");
    assert_eq!(case.name, "roll-damping");
    assert_eq!(case.panels, 24);
    assert_eq!(case.alpha_deg, TrimValueConfig::Specified { value: 4.0 });
    assert_eq!(case.roll_rate, TrimValueConfig::Specified { value: 0.05 });
    assert_eq!(case.roll_moment, TrimValueConfig::Solved);
    assert_eq!(case.spacing, SpacingConfig::Cosine);
    assert!((case.tolerance - 1e-6).abs() < 1e-18);
}

#[test]
fn angle_axes_convert_degrees_to_radians() {
    let mut case = cruise_case(16);
    case.alpha_deg = TrimValueConfig::Specified { value: 3.0 };
    case.lift = TrimValueConfig::Solved;
    case.sideslip_deg = 2.0;
    case.roll_rate = TrimValueConfig::Specified { value: 0.05 };
    let targets = targets_from_config(&case);
    match targets.alpha {
        TrimValue::Specified(value) => assert!(
            (value - 3f64.to_radians()).abs() < 1e-15,
            "alpha = {value} rad"
        ),
        TrimValue::Solved => panic!("alpha must stay specified"),
    }
    match targets.sideslip {
        TrimValue::Specified(value) => assert!(
            (value - 2f64.to_radians()).abs() < 1e-15,
            "sideslip = {value} rad"
        ),
        TrimValue::Solved => panic!("sideslip is always specified"),
    }
    // Rates are already nondimensional and pass through unchanged.
    match targets.roll_rate {
        TrimValue::Specified(value) => assert!((value - 0.05).abs() < 1e-15),
        TrimValue::Solved => panic!("roll rate must stay specified"),
    }
    assert!(matches!(targets.lift, TrimValue::Solved));
}

#[test]
fn geometry_errors_surface_through_the_case_runner() {
    let mut wing = tapered_wing();
    wing.stations.truncate(1);
    let err = run_case(&wing, &cruise_case(16)).unwrap_err();
    assert!(matches!(err, CaseError::Geometry(_)), "got {err}");
}

#[test]
fn lattice_errors_surface_through_the_case_runner() {
    let mut case = cruise_case(16);
    case.panels = 7;
    let err = run_case(&tapered_wing(), &case).unwrap_err();
    assert!(matches!(err, CaseError::Lattice(_)), "got {err}");
}
