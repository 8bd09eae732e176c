use std::fs;
use std::path::Path;

use la_merge::{run, BatchConfig, ImportError, SpecialRules};
use serde_json::{json, Value};

fn write_json(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn config(root: &Path) -> BatchConfig {
    BatchConfig {
        base_dir: root.join("base"),
        translated_dir: root.join("translated"),
        output_dir: root.join("merged"),
        keep_going: false,
    }
}

#[test]
fn test_batch_scenarios() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());

    write_json(
        &config.base_dir.join("Story.json"),
        &json!({
            "rules": {"primaryKeys": ["character.id", "episode"]},
            "data": [
                {
                    "character": [{"id": "hski"}],
                    "episode": 2,
                    "text": "hello",
                    "choices": ["yes", "no"],
                    "hints": ["keep"]
                },
                {"character": [], "episode": 3, "text": "untouched"}
            ]
        }),
    );
    write_json(
        &config.translated_dir.join("nested").join("Story.json"),
        &json!({
            "hski|2|text": "bonjour",
            "hski|2|choices": "[LA_F]one[LA_N_F]two[LA_N_F]three",
            "hski|2|hints": "[LA_F]",
            "|3|text": "changed"
        }),
    );
    write_json(
        &config.base_dir.join("Extra.json"),
        &json!({"rules": {"primaryKeys": ["id"]}, "data": [{"id": "A1", "text": "hello"}]}),
    );

    let summary = run(&config, &SpecialRules::builtin()).unwrap();
    assert!(summary.is_success());
    assert_eq!(summary.imported.len(), 1);

    let merged = read_json(&config.output_dir.join("Story.json"));
    assert_eq!(
        merged["data"][0],
        json!({
            "character": [{"id": "hski"}],
            "episode": 2,
            "text": "bonjour",
            "choices": ["one", "two", "three"],
            "hints": []
        })
    );
    // 主键 character.id 缺失时记为空串
    assert_eq!(merged["data"][1]["text"], "changed");
    assert_eq!(merged["rules"], json!({"primaryKeys": ["character.id", "episode"]}));

    // 输出目录扁平，只有翻译目录中出现的文件
    assert!(!config.output_dir.join("nested").exists());
    assert!(!config.output_dir.join("Extra.json").exists());
}

#[test]
fn test_untranslated_document_round_trips() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());
    let base_text = r#"{
  "rules": {
    "primaryKeys": [
      "id"
    ]
  },
  "data": [
    {
      "id": "A1",
      "zeta": "ü",
      "alpha": [
        1,
        2
      ],
      "nested": {
        "b": null,
        "a": true
      }
    }
  ]
}"#;
    fs::create_dir_all(&config.base_dir).unwrap();
    fs::write(config.base_dir.join("Item.json"), base_text).unwrap();
    write_json(&config.translated_dir.join("Item.json"), &json!({"B2|zeta": "x"}));

    run(&config, &SpecialRules::builtin()).unwrap();
    let written = fs::read_to_string(config.output_dir.join("Item.json")).unwrap();
    assert_eq!(written, base_text);
}

#[test]
fn test_missing_primary_keys_writes_nothing() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());
    write_json(&config.base_dir.join("Bad.json"), &json!({"rules": {}, "data": []}));
    write_json(&config.translated_dir.join("Bad.json"), &json!({}));

    let result = run(&config, &SpecialRules::builtin());
    assert!(matches!(result, Err(ImportError::Malformed { .. })));
    assert!(!config.output_dir.join("Bad.json").exists());
}
