use std::fs;
use std::path::{Path, PathBuf};

use sourcegen::blueprint::{Blueprint, Emitter, VariantContext};
use sourcegen::config::{parse_config, BuildFeatures, Config, LanguagesSchemaOptions};
use sourcegen::driver::{Driver, Lifecycle};
use sourcegen::error::{Error, Result};
use sourcegen::host::{Host, ProjectHost};
use sourcegen::module::ModuleExtension;
use sourcegen::writer::CodeWriter;
use tempfile::TempDir;
use walkdir::WalkDir;

fn config(features: BuildFeatures) -> Config {
    Config::builder()
        .module(ModuleExtension::Application {
            namespace: Some("com.example.app".into()),
            application_id: Some("com.example.app".into()),
            version_name: Some("1.0".into()),
            version_code: Some(1),
        })
        .build_type("debug", Default::default())
        .features(features)
        .languages_schema(
            LanguagesSchemaOptions::new("en".parse().unwrap()).supported("fr".parse().unwrap()),
        )
        .build()
        .unwrap()
}

fn directories(root: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<_> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    dirs.sort();
    dirs
}

fn run(project_dir: &Path, config: Config) -> (Driver, ProjectHost) {
    let mut host = ProjectHost::new(project_dir, config);
    let writer = CodeWriter::for_build_dir(host.build_dir());
    let mut driver = Driver::from_config(host.config(), writer);
    driver.run(&mut host).unwrap();
    (driver, host)
}

#[test_log::test]
fn test_only_enabled_blueprint_creates_directories() {
    let temp_dir = TempDir::new().unwrap();
    let features = BuildFeatures { build_profile: true, ..Default::default() };

    let (driver, _host) = run(temp_dir.path(), config(features));

    let root = driver.writer().source_output_dir().to_path_buf();
    let expected: Vec<PathBuf> = [
        "buildProfile",
        "buildProfile/debug",
        "buildProfile/debug/java",
        "buildProfile/debug/kotlin",
        "buildProfile/debug/kotlin/com",
        "buildProfile/debug/kotlin/com/example",
        "buildProfile/debug/kotlin/com/example/app",
        "buildProfile/debug/kotlin/com/example/app/build",
        "buildProfile/debug/res",
        "buildProfile/debug/resources",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(directories(&root), expected);
    assert!(!root.join("xmlResources").exists());
    assert!(!root.join("languagesSchema").exists());
}

#[test]
fn test_disabled_blueprints_create_nothing() {
    let temp_dir = TempDir::new().unwrap();

    let (driver, _host) = run(temp_dir.path(), config(BuildFeatures::default()));

    assert!(!driver.writer().source_output_dir().exists());
    assert!(driver.states().iter().all(|(_, state)| *state == Lifecycle::Skipped));
}

#[test]
fn test_lifecycle_states() {
    let temp_dir = TempDir::new().unwrap();
    let features = BuildFeatures { build_profile: true, ..Default::default() };
    let mut host = ProjectHost::new(temp_dir.path(), config(features));
    let mut driver =
        Driver::from_config(host.config(), CodeWriter::for_build_dir(temp_dir.path().join("build")));

    let created = driver.states();
    assert!(created.iter().all(|(_, state)| *state == Lifecycle::Created));

    driver.finalize_dsl(&mut host).unwrap();
    assert_eq!(
        driver.states(),
        vec![
            ("buildProfile".to_string(), Lifecycle::Configured),
            ("xmlResources".to_string(), Lifecycle::Skipped),
            ("languagesSchema".to_string(), Lifecycle::Skipped),
        ]
    );

    let variant = host.variants().unwrap().remove(0);
    let emissions = driver.on_variant(&variant).unwrap();
    assert_eq!(emissions.len(), 1);
    assert_eq!(driver.states()[0].1, Lifecycle::Emitting("debug".to_string()));

    driver.finish();
    assert_eq!(driver.states()[0].1, Lifecycle::EmittedAll);
    assert_eq!(driver.states()[1].1, Lifecycle::Skipped);

    assert!(matches!(driver.finalize_dsl(&mut host), Err(Error::LifecycleError(_))));
}

#[test]
fn test_on_variant_before_finalize_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let features = BuildFeatures { build_profile: true, ..Default::default() };
    let host = ProjectHost::new(temp_dir.path(), config(features));
    let mut driver =
        Driver::from_config(host.config(), CodeWriter::for_build_dir(temp_dir.path().join("build")));

    let variant = host.variants().unwrap().remove(0);
    assert!(matches!(driver.on_variant(&variant), Err(Error::LifecycleError(_))));
}

#[test]
fn test_coordinates_per_blueprint() {
    let temp_dir = TempDir::new().unwrap();
    let features = BuildFeatures { build_profile: true, xml_resources: true, languages_schema: true };

    let (driver, _host) = run(temp_dir.path(), config(features));

    assert_eq!(driver.coordinates("buildProfile").unwrap().package_name, "com.example.app.build");
    assert_eq!(driver.coordinates("xmlResources").unwrap().package_name, "com.example.app");
    assert_eq!(driver.coordinates("languagesSchema").unwrap().package_name, "com.example.app.locale");
}

#[test]
fn test_source_sets_registered_per_build_type() {
    let temp_dir = TempDir::new().unwrap();
    let config = parse_config("features:\n  buildProfile: true\n").unwrap();

    let (driver, host) = run(temp_dir.path(), config);

    let source_sets = host.source_sets();
    assert_eq!(source_sets.keys().collect::<Vec<_>>(), ["debug", "release"]);
    let debug = &source_sets["debug"];
    assert_eq!(debug.kotlin.len(), 3);
    assert_eq!(
        debug.kotlin[0],
        driver.writer().source_output_dir().join("buildProfile/debug/kotlin")
    );
    assert_eq!(debug.res[1], driver.writer().source_output_dir().join("xmlResources/debug/res"));

    let report = temp_dir.path().join("report/source-sets.json");
    host.write_source_sets(&report).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();
    assert_eq!(json["release"]["java"].as_array().unwrap().len(), 3);
}

#[test]
fn test_flavored_variants_are_registered() {
    let temp_dir = TempDir::new().unwrap();
    let config = parse_config("productFlavors:\n  free: {}\nfeatures:\n  buildProfile: true\n").unwrap();
    let mut host = ProjectHost::new(temp_dir.path(), config);
    let mut driver =
        Driver::from_config(host.config(), CodeWriter::for_build_dir(temp_dir.path().join("build")));

    let emissions = driver.run(&mut host).unwrap();

    let variants: Vec<_> = emissions.iter().map(|e| e.variant.as_str()).collect();
    assert_eq!(variants, ["freeDebug", "freeRelease"]);
    let source_sets = host.source_sets();
    assert_eq!(
        source_sets.keys().collect::<Vec<_>>(),
        ["debug", "release", "freeDebug", "freeRelease"]
    );
    for emission in &emissions {
        assert!(source_sets[&emission.variant].kotlin.contains(&emission.dirs.kotlin));
    }
    assert!(!source_sets["debug"].kotlin.contains(&emissions[0].dirs.kotlin));
}

#[test]
fn test_emission_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let features = BuildFeatures { build_profile: true, xml_resources: true, languages_schema: true };

    let (first, _) = run(temp_dir.path(), config(features));
    let file = first
        .writer()
        .source_output_dir()
        .join("buildProfile/debug/kotlin/com/example/app/build/BuildProfile.kt");
    let before = fs::read(&file).unwrap();

    let (_, _) = run(temp_dir.path(), config(features));
    assert_eq!(fs::read(&file).unwrap(), before);

    let other_dir = TempDir::new().unwrap();
    let (second, _) = run(other_dir.path(), config(features));
    assert!(!dir_diff::is_different(
        first.writer().source_output_dir(),
        second.writer().source_output_dir()
    )
    .unwrap());
}

#[test]
fn test_stale_files_are_removed() {
    let temp_dir = TempDir::new().unwrap();
    let features = BuildFeatures { build_profile: true, ..Default::default() };
    let writer = CodeWriter::for_build_dir(temp_dir.path().join("build"));
    let stale = writer.output_dirs("buildProfile", "debug").kotlin.join("Stale.kt");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "object Stale").unwrap();

    run(temp_dir.path(), config(features));

    assert!(!stale.exists());
}

struct Failing;

impl Blueprint for Failing {
    fn tag(&self) -> &'static str {
        "Failing"
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn on_variant(&self, ctx: &VariantContext<'_>, _emitter: &Emitter<'_>) -> Result<()> {
        if ctx.variant.name == "release" {
            return Err(Error::ConfigError("boom".to_string()));
        }
        Ok(())
    }
}

#[test]
fn test_failure_keeps_earlier_variants() {
    let temp_dir = TempDir::new().unwrap();
    let mut host = ProjectHost::new(temp_dir.path(), parse_config("{}").unwrap());
    let mut driver = Driver::new(CodeWriter::for_build_dir(temp_dir.path().join("build")));
    driver.register(Box::new(Failing));

    match driver.run(&mut host) {
        Err(Error::EmissionError { blueprint, variant, .. }) => {
            assert_eq!(blueprint, "failing");
            assert_eq!(variant, "release");
        }
        other => panic!("Expected EmissionError, got {other:?}"),
    }
    assert!(driver.writer().output_dirs("failing", "debug").kotlin.exists());
}
