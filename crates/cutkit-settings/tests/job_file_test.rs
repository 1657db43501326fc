use cutkit_core::geometry::Point;
use cutkit_core::{
    BridgeShape, BridgeSpec, CamOp, CombineOp, Direction, JobSpec, OperationSpec, Units, ZOrigin,
};
use cutkit_settings::{JobConfig, JobFormat, SettingsError};
use tempfile::TempDir;

fn square(x: f64, y: f64, size: f64) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x + size, y),
        Point::new(x + size, y + size),
        Point::new(x, y + size),
    ]
}

fn sample_job() -> JobSpec {
    let mut job = JobSpec::default();
    job.tool.units = Units::Mm;
    job.tool.diameter = 3.175;
    job.tool.stepover = 0.5;
    job.material.z_origin = ZOrigin::Bottom;
    job.material.thickness = 0.75;
    job.program.units = Units::Mm;
    job.program.decimal = 3;
    job.program.offset_x = 10.0;
    job.bridges = BridgeSpec {
        units: Units::Inch,
        max_cut_depth: 0.5,
        shapes: vec![BridgeShape {
            margin: 0.05,
            geometry: vec![square(0.9, 0.4, 0.2)],
            ..BridgeShape::default()
        }],
    };
    job.operations.push(OperationSpec {
        name: "Outer profile".into(),
        direction: Direction::Climb,
        cut_depth: 0.75,
        ramp: true,
        ..OperationSpec::new(CamOp::Outside).with_geometry(vec![square(0.0, 0.0, 1.0)])
    });
    job.operations.push(OperationSpec {
        combine: CombineOp::Diff,
        margin: 0.01,
        ..OperationSpec::new(CamOp::Pocket)
            .with_geometry(vec![square(0.0, 0.0, 1.0)])
            .with_geometry(vec![square(0.25, 0.25, 0.5)])
    });
    job
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job.json");

    let config = JobConfig::from_job(sample_job());
    config.save_to_file(&path).unwrap();
    let loaded = JobConfig::load_from_file(&path).unwrap();

    assert_eq!(loaded.job, config.job);
    assert!(loaded.warnings.is_empty());
}

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job.toml");

    let config = JobConfig::from_job(sample_job());
    config.save_to_file(&path).unwrap();
    let loaded = JobConfig::load_from_file(&path).unwrap();

    assert_eq!(loaded.job, config.job);
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job.yaml");

    let err = JobConfig::new().save_to_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::UnsupportedFormat(_)));
    assert!(!path.exists());
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = JobConfig::load_from_file(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, SettingsError::LoadError(_)));
}

#[test]
fn test_invalid_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job.json");
    std::fs::write(&path, r#"{ "operations": [ { "cut_depth": -1.0 } ] }"#).unwrap();

    let err = JobConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting(_)));
}

#[test]
fn test_hand_written_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sign.toml");
    std::fs::write(
        &path,
        r#"
[program]
units = "mm"

[[operations]]
name = "Letters"
kind = "Engrave"
geometries = [[[[0.0, 0.0], [1.0, 0.0]], [[0.0, 0.5], [1.0, 0.5]]]]
"#,
    )
    .unwrap();

    let loaded = JobConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded.job.program.units, Units::Mm);
    assert_eq!(loaded.job.operations[0].name, "Letters");
    assert_eq!(loaded.job.operations[0].geometries[0].len(), 2);
    assert_eq!(JobFormat::from_path(&path).unwrap(), JobFormat::Toml);
}
