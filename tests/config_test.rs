use std::fs;
use std::path::PathBuf;

use sourcegen::config::{
    find_config, get_config, parse_config, BuildFeatures, BuildTypeOptions, Config,
    LanguagesSchemaOptions, ProductFlavor,
};
use sourcegen::constants::CONFIG_FILES;
use sourcegen::error::Error;
use sourcegen::module::ModuleExtension;
use tempfile::TempDir;

const YAML: &str = r#"
module:
  type: application
  namespace: com.example.app
  applicationId: com.example.app
  versionName: "1.2.0"
  versionCode: 12
buildTypes:
  debug:
    applicationIdSuffix: .debug
  release: {}
flavorDimensions: [tier]
productFlavors:
  free:
    dimension: tier
  paid:
    dimension: tier
    versionCode: 1012
features:
  buildProfile: true
  xmlResources: true
languagesSchema:
  defaultLocale: en-US
  supportedLocales: [fr, de-rDE]
variants:
  exclude: ["paid*"]
output:
  buildDir: out
"#;

#[test]
fn test_parse_yaml() {
    let config = parse_config(YAML).unwrap();

    assert_eq!(
        config.module,
        Some(ModuleExtension::Application {
            namespace: Some("com.example.app".into()),
            application_id: Some("com.example.app".into()),
            version_name: Some("1.2.0".into()),
            version_code: Some(12),
        })
    );
    let names: Vec<_> = config.build_types.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["debug", "release"]);
    assert!(config.build_types[0].is_debuggable());
    assert!(!config.build_types[1].is_debuggable());
    assert_eq!(config.product_flavors["paid"].version_code, Some(1012));
    assert!(config.features.build_profile);
    assert!(config.features.xml_resources);
    assert!(!config.features.languages_schema);

    let languages = config.languages_schema.unwrap();
    assert_eq!(languages.default_locale.tag(), "en-US");
    let supported: Vec<_> = languages.supported_locales.iter().map(|l| l.tag()).collect();
    assert_eq!(supported, ["fr", "de-DE"]);
    assert_eq!(config.variants.exclude, ["paid*"]);
    assert_eq!(config.output.build_dir, PathBuf::from("out"));
}

#[test]
fn test_parse_json() {
    let json = r#"{
        "module": { "type": "library", "namespace": "com.example.lib" },
        "features": { "buildProfile": true }
    }"#;
    let config = parse_config(json).unwrap();

    assert_eq!(config.module, Some(ModuleExtension::Library { namespace: Some("com.example.lib".into()) }));
    assert!(config.features.build_profile);
}

#[test]
fn test_defaults() {
    let config = parse_config("{}").unwrap();

    assert!(config.module.is_none());
    let names: Vec<_> = config.build_types.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["debug", "release"]);
    assert_eq!(config.features, BuildFeatures::default());
    assert!(config.languages_schema.is_none());
    assert_eq!(config.output.build_dir, PathBuf::from("build"));
}

#[test]
fn test_builder_defaults_build_types() {
    let config = Config::builder().build().unwrap();
    let names: Vec<_> = config.build_types.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["debug", "release"]);
}

#[test]
fn test_invalid_format() {
    let result = parse_config("features: [unterminated");
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_unknown_feature_is_rejected() {
    let result = parse_config("features:\n  buildProfiles: true\n");
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_malformed_locale_is_rejected() {
    let result = parse_config("languagesSchema:\n  defaultLocale: not-a-locale\n");
    assert!(result.is_err());
}

#[test]
fn test_languages_feature_requires_options() {
    let result = parse_config("features:\n  languagesSchema: true\n");
    match result {
        Err(Error::ValidationError(msg)) => assert!(msg.contains("languagesSchema block")),
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_invalid_build_type_name() {
    let result = Config::builder().build_type("Release-Candidate", BuildTypeOptions::default()).build();
    assert!(matches!(result, Err(Error::ValidationError(_))));
}

#[test]
fn test_undeclared_dimension() {
    let result = Config::builder()
        .flavor_dimension("tier")
        .product_flavor("free", ProductFlavor { dimension: Some("store".into()), ..Default::default() })
        .build();
    match result {
        Err(Error::ValidationError(msg)) => assert!(msg.contains("undeclared dimension 'store'")),
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_flavor_without_dimension() {
    let result = parse_config(
        r#"
flavorDimensions: ["tier"]
productFlavors:
  free:
    dimension: tier
  paid: {}
"#,
    );
    match result {
        Err(Error::ValidationError(msg)) => assert!(msg.contains("product flavor 'paid'")),
        other => panic!("Expected ValidationError, got {other:?}"),
    }

    let config = parse_config("productFlavors:\n  free: {}\n").unwrap();
    assert_eq!(config.product_flavors["free"].dimension, None);
}

#[test]
fn test_invalid_exclude_pattern() {
    let result = Config::builder().exclude_variant("[debug").build();
    assert!(matches!(result, Err(Error::ValidationError(_))));
}

#[test]
fn test_builder() {
    let config = Config::builder()
        .module(ModuleExtension::DynamicFeature { namespace: Some("com.example.feature".into()) })
        .build_type("staging", BuildTypeOptions { debuggable: Some(true), ..Default::default() })
        .features(BuildFeatures { languages_schema: true, ..Default::default() })
        .languages_schema(LanguagesSchemaOptions::new("en".parse().unwrap()).supported("ro".parse().unwrap()))
        .build_dir("target/android")
        .build()
        .unwrap();

    assert_eq!(config.build_types.len(), 1);
    assert!(config.build_types[0].is_debuggable());
    assert_eq!(config.output.build_dir, PathBuf::from("target/android"));
}

#[test]
fn test_effective_locales_skip_duplicates() {
    let options = LanguagesSchemaOptions::new("en".parse().unwrap())
        .supported("fr".parse().unwrap())
        .supported("en".parse().unwrap())
        .supported("fr".parse().unwrap());

    let tags: Vec<_> = options.effective_locales().iter().map(|l| l.tag()).collect();
    assert_eq!(tags, ["en", "fr"]);
}

#[test]
fn test_find_config_order() {
    let temp_dir = TempDir::new().unwrap();
    assert!(matches!(find_config(temp_dir.path(), &CONFIG_FILES), Err(Error::ConfigError(_))));

    fs::write(temp_dir.path().join("sourcegen.yaml"), "{}").unwrap();
    fs::write(temp_dir.path().join("sourcegen.json"), "{}").unwrap();
    assert_eq!(
        find_config(temp_dir.path(), &CONFIG_FILES).unwrap(),
        temp_dir.path().join("sourcegen.json")
    );
}

#[test]
fn test_get_config_explicit_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.yml");
    fs::write(&path, YAML).unwrap();

    let config = get_config(temp_dir.path(), Some(&path)).unwrap();
    assert!(config.features.build_profile);
}
