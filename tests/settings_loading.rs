use std::fs;

use kanna_diary::collection::AnalysisConfig;
use kanna_diary::error::ConfigError;
use kanna_diary::settings::Settings;
use tempfile::TempDir;

fn write_settings(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn full_settings_file_round_trips_through_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");
    Settings::default().persist(&path).unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded.persona.birthday, "02-14");
    assert_eq!(loaded.generation.max_tokens, 2000);
    let config = AnalysisConfig::from_settings(&loaded.analysis).unwrap();
    let names: Vec<&str> = config
        .emotion_keywords()
        .categories()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["happy", "sad", "surprised", "angry", "learning", "anxious", "relieved", "grateful"]
    );
}

#[test]
fn keyword_table_keeps_document_order() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(
        &dir,
        r#"{
            "analysis": {
                "emotionKeywords": { "grateful": ["感謝"], "sad": ["悲しい"], "happy": ["楽しい"] },
                "importanceThreshold": 0.4
            }
        }"#,
    );

    let settings = Settings::load(&path).unwrap();
    let config = AnalysisConfig::from_settings(&settings.analysis).unwrap();
    let names: Vec<&str> = config
        .emotion_keywords()
        .categories()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["grateful", "sad", "happy"]);
    assert_eq!(config.importance_cutoff(), 40.0);
}

#[test]
fn out_of_range_threshold_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, r#"{ "analysis": { "importanceThreshold": 60 } }"#);
    let settings = Settings::load(&path).unwrap();
    // Keyword table absent inside an explicit analysis section
    assert!(matches!(
        AnalysisConfig::from_settings(&settings.analysis),
        Err(ConfigError::MissingKeywordTable)
    ));

    let path = write_settings(
        &dir,
        r#"{ "analysis": { "emotionKeywords": { "happy": ["楽しい"] }, "importanceThreshold": 60 } }"#,
    );
    let settings = Settings::load(&path).unwrap();
    assert!(matches!(
        AnalysisConfig::from_settings(&settings.analysis),
        Err(ConfigError::InvalidThreshold(t)) if t == 60.0
    ));
}

#[test]
fn empty_keyword_category_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, r#"{ "analysis": { "emotionKeywords": { "happy": [] } } }"#);
    let settings = Settings::load(&path).unwrap();
    assert!(matches!(
        AnalysisConfig::from_settings(&settings.analysis),
        Err(ConfigError::EmptyKeywordCategory(name)) if name == "happy"
    ));
}

#[test]
fn missing_and_malformed_files_are_reported() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        Settings::load(&dir.path().join("absent.json")),
        Err(ConfigError::Read { .. })
    ));

    let path = write_settings(&dir, "{ not json");
    assert!(matches!(Settings::load(&path), Err(ConfigError::Parse { .. })));
}
