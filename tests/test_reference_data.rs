mod common;

use common::DataDir;
use plexus::anatomy::{BUILTIN_GRAPH, BUILTIN_LESIONS, CatalogLoader, LoaderOptions, Region};
use plexus::config::EngineConfig;
use plexus::error::{ConfigError, DataError, ValidationIssue};

fn issues(dir: &DataDir) -> Vec<ValidationIssue> {
    match CatalogLoader::with_defaults().load_dir(dir.path()) {
        Err(DataError::Validation { issues, .. }) => issues,
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn builtin_copy_loads_from_directory() {
    let dir = DataDir::builtin();
    let result = CatalogLoader::with_defaults().load_dir(dir.path()).unwrap();
    assert!(result.warnings.is_empty());
    assert_eq!(
        result.catalog.lesions().len(),
        common::catalog().lesions().len()
    );
    assert!(!result.catalog.muscles_by_region(Region::Lower).is_empty());
}

#[test]
fn affected_nerve_outside_affected_segments_fails_the_load() {
    let broken = BUILTIN_LESIONS.replacen(
        "segments: [nerve-axillary]\n",
        "segments: [nerve-suprascapular]\n",
        1,
    );
    assert_ne!(broken, BUILTIN_LESIONS);
    let dir = DataDir::builtin().with_text("lesions.yaml", &broken);

    let issues = issues(&dir);
    assert!(
        issues
            .iter()
            .any(|i| i.message.contains("'axillary' is not carried")),
        "{issues:?}"
    );
}

#[test]
fn muscle_listed_twice_fails_the_load() {
    let doubled = BUILTIN_LESIONS.replacen(
        "muscles: [Abductor pollicis brevis, Opponens pollicis]",
        "muscles: [Abductor pollicis brevis, Abductor pollicis brevis, Opponens pollicis]",
        1,
    );
    assert_ne!(doubled, BUILTIN_LESIONS);
    let dir = DataDir::builtin().with_text("lesions.yaml", &doubled);

    let issues = issues(&dir);
    assert_eq!(issues.len(), 1, "{issues:?}");
    assert!(issues[0].path.ends_with(".muscles[1]"));
    assert!(issues[0].message.contains("'Abductor pollicis brevis' listed twice"));
}

#[test]
fn root_carrying_a_nerve_of_another_trunk_fails_the_load() {
    // ulnar leaves through the medial cord, out of reach of C5
    let rewired = BUILTIN_GRAPH.replacen(
        "{ id: c5-root, tag: root-c5, from: C5, to: upper-trunk, carries: [suprascapular,",
        "{ id: c5-root, tag: root-c5, from: C5, to: upper-trunk, carries: [ulnar, suprascapular,",
        1,
    );
    assert_ne!(rewired, BUILTIN_GRAPH);
    let dir = DataDir::builtin().with_text("plexus.yaml", &rewired);

    let issues = issues(&dir);
    assert!(
        issues
            .iter()
            .any(|i| i.message == "'ulnar' is not reachable through segment 'c5-root'"),
        "{issues:?}"
    );
}

#[test]
fn unknown_muscle_is_reported_with_its_path() {
    let dir = DataDir::builtin().with_fixture("lesions.yaml", "lesions_unknown_muscle.yaml");
    let issues = issues(&dir);
    assert_eq!(issues.len(), 1, "{issues:?}");
    assert_eq!(issues[0].path, "lesions[0].muscles[0]");
    assert!(issues[0].message.contains("Deltiod"));
}

#[test]
fn region_with_too_few_lesions_fails() {
    let dir = DataDir::builtin().with_fixture("lesions.yaml", "lesions_too_few.yaml");
    let issues = issues(&dir);
    assert!(issues.iter().any(|i| i.message.contains("Region LE has 2")));
}

#[test]
fn dangling_segment_and_empty_carries_are_both_reported() {
    let dir = DataDir::builtin().with_fixture("plexus.yaml", "plexus_dangling_segment.yaml");
    let issues = issues(&dir);
    assert!(issues.iter().any(|i| i.path == "segments[0].to"));
    assert!(issues.iter().any(|i| i.path == "segments[1].carries"));
    // builtin lesions now reference tags the small graph lacks
    assert!(
        issues
            .iter()
            .any(|i| i.message.contains("Unknown structural tag 'trunk-upper'"))
    );
}

#[test]
fn unknown_field_is_a_parse_error() {
    let dir = DataDir::builtin().with_fixture("lesions.yaml", "lesions_unknown_field.yaml");
    let err = CatalogLoader::with_defaults().load_dir(dir.path()).unwrap_err();
    match err {
        DataError::Parse { message, .. } => assert!(message.contains("severity"), "{message}"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn syntax_error_reports_a_line() {
    let dir = DataDir::builtin().with_fixture("lesions.yaml", "bad_yaml.yaml");
    let err = CatalogLoader::with_defaults().load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, DataError::Parse { line: Some(_), .. }), "{err:?}");
}

#[test]
fn empty_document_is_rejected() {
    let dir = DataDir::builtin().with_fixture("muscles.yaml", "empty.yaml");
    let err = CatalogLoader::with_defaults().load_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains("empty"), "{err}");
}

#[test]
fn missing_file_is_reported() {
    let dir = DataDir::builtin();
    std::fs::remove_file(dir.path().join("muscles.yaml")).unwrap();
    let err = CatalogLoader::with_defaults().load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, DataError::MissingFile { ref path } if path.ends_with("muscles.yaml")));
}

#[test]
fn strict_mode_rejects_warnings() {
    let with_warning = BUILTIN_LESIONS.replacen(
        "  - name: Neuralgic amyotrophy (Parsonage-Turner)\n",
        "  - name: Neuralgic amyotrophy (Parsonage-Turner)\n    pathway: [suprascapular]\n",
        1,
    );
    assert_ne!(with_warning, BUILTIN_LESIONS);
    let dir = DataDir::builtin().with_text("lesions.yaml", &with_warning);

    let relaxed = CatalogLoader::with_defaults().load_dir(dir.path()).unwrap();
    assert_eq!(relaxed.warnings.len(), 1);

    let strict = CatalogLoader::new(LoaderOptions {
        strict: true,
        ..LoaderOptions::default()
    });
    assert!(matches!(
        strict.load_dir(dir.path()),
        Err(DataError::Validation { .. })
    ));
}

#[test]
fn engine_config_fixtures() {
    let wide = EngineConfig::load(&common::fixture_path("engine_wide_margin.yaml")).unwrap();
    assert!((wide.positional_margin - 100.0).abs() < f64::EPSILON);
    assert_eq!(wide.abnormal_sample_size, 4);

    let err = EngineConfig::load(&common::fixture_path("engine_invalid.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "abnormal_sample_size"));
}
