use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use photo_gallery::assets::{AssetProvider, StaticAssets};
use photo_gallery::config::Configuration;
use photo_gallery::gallery::GalleryOptions;

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
interval: 3s
transition:
  duration: 250ms
heading:
  text1: OUR
  text2: WORK
asset-root: /srv/gallery
records:
  - source: hero.jpg
    title: Image 1
    description: This is the first image in the gallery.
  - source: https://cdn.example.com/hero2.jpg
    title: Image 2
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.interval, Duration::from_secs(3));
    assert_eq!(cfg.transition.duration, Duration::from_millis(250));
    assert_eq!(cfg.heading.text1, "OUR");
    assert_eq!(cfg.asset_root, Some(PathBuf::from("/srv/gallery")));
    assert_eq!(cfg.records.len(), 2);
    assert_eq!(cfg.records[1].description, "");

    let options = GalleryOptions::from(&cfg);
    assert_eq!(options.interval, Duration::from_secs(3));
    assert_eq!(options.heading.text2, "WORK");
}

#[test]
fn defaults_apply_when_omitted() {
    let yaml = r#"
records:
  - source: a.jpg
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let cfg = cfg.validated().unwrap();
    assert_eq!(cfg.interval, Duration::from_secs(5));
    assert_eq!(cfg.transition.duration, Duration::from_millis(500));
    assert_eq!(cfg.heading.text1, "GALLERY");
    assert_eq!(cfg.heading.text2, "COLLECTIONS");
}

#[test]
fn unknown_fields_are_rejected() {
    let yaml = r#"
intervall: 3s
records:
  - source: a.jpg
"#;
    assert!(serde_yaml::from_str::<Configuration>(yaml).is_err());
}

#[test]
fn empty_records_fail_validation() {
    let cfg: Configuration = serde_yaml::from_str("interval: 1s\n").unwrap();
    let err = cfg.validated().unwrap_err();
    assert!(err.to_string().contains("at least one"));
}

#[test]
fn relative_asset_root_is_anchored_at_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gallery.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "asset-root: assets\nrecords:\n  - source: hero.jpg\n    title: Image 1"
    )
    .unwrap();

    let cfg = Configuration::from_yaml_file(&path)
        .unwrap()
        .validated()
        .unwrap();
    assert_eq!(cfg.asset_root, Some(dir.path().join("assets")));

    let records = StaticAssets::from_config(&cfg).records().unwrap();
    assert_eq!(
        records[0].source.as_str(),
        dir.path().join("assets").join("hero.jpg").display().to_string()
    );
    assert_eq!(records[0].title, "Image 1");
}

#[test]
fn missing_file_reports_path() {
    let err = Configuration::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here.yaml"));
}
