//! Rendering templates against written text exports.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::TempDir;
use yutool_model::MethodIdentity;
use yutool_template::{
    RenderOptions, TemplateError, discover_template_variants, locate_template, render_template,
    update_template_file,
};

const TEMPLATE: &str = r#"{
  // rendered by yutool
  name: "星陳",
  version: "v3.9.0",
  config_version: '2026.1.29-3',
  fonts: [{ name: "Yuniversus", file: "yuniversus.woff2", type: "woff2" }],
  key_bindings: [],
  items_meta: [
    { category: ["roots"], prefix: ["G"], append_suffix: "_" },
    { category: ["quick_chars", "pop_chars"], max_length: 1 },
  ],
  tabs: [{ label: "字根", type: "roots", beg: 0, end: 0 }],
  help: "按空格翻页",
}
"#;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("yustar.template.json5");
    fs::write(&template, TEMPLATE).unwrap();
    fs::write(dir.path().join("roots.txt"), "土\tGga\n士\tGga\n口\tHa\n").unwrap();
    fs::write(dir.path().join("quick_chars.txt"), "a\t工\nab\t式\n").unwrap();
    (dir, template)
}

#[test]
fn renders_items_and_bumps_version_same_day() {
    let (dir, template) = fixture();
    let identity = MethodIdentity::new("yustar").with_release_version(Some("v3.10.0".into()));
    let options = RenderOptions {
        export_dir: dir.path(),
        identity: &identity,
        today: day(2026, 1, 29),
    };

    let outcome = render_template(&template, &options).expect("render");

    assert_eq!(outcome.output, dir.path().join("yustar_v3.10.0.json5"));
    assert_eq!(outcome.config_version.to_string(), "2026.1.29-4");
    assert_eq!(outcome.item_counts, vec![1, 1]);
    assert_eq!(outcome.missing_categories, vec!["pop_chars".to_string()]);

    let json = fs::read_to_string(&outcome.output).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "name": "星陳",
      "version": "v3.10.0",
      "config_version": "2026.1.29-4",
      "fonts": [
        {
          "name": "Yuniversus",
          "file": "yuniversus.woff2",
          "type": "woff2",
          "base64": ""
        }
      ],
      "key_bindings": [],
      "items": [
        {
          "Gga_": [
            "土",
            "士"
          ]
        },
        {
          "a": [
            "工"
          ]
        }
      ],
      "tabs": [
        {
          "label": "字根",
          "type": "roots",
          "beg": 0,
          "end": 0
        }
      ],
      "help": "按空格翻页"
    }
    "#);

    // rendering leaves the template alone
    assert_eq!(fs::read_to_string(&template).unwrap(), TEMPLATE);
}

#[test]
fn other_day_resets_sequence_and_keeps_template_version() {
    let (dir, template) = fixture();
    let identity = MethodIdentity::new("yustar");
    let options = RenderOptions {
        export_dir: dir.path(),
        identity: &identity,
        today: day(2026, 1, 30),
    };

    let outcome = render_template(&template, &options).expect("render");
    assert_eq!(outcome.config_version.to_string(), "2026.1.30-1");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("yustar.json5")).unwrap())
            .unwrap();
    assert_eq!(value["version"], "v3.9.0");
    assert!(value.get("items_meta").is_none());
}

#[test]
fn in_place_update_rewrites_only_the_token() {
    let (dir, template) = fixture();
    let identity = MethodIdentity::new("yustar");
    let options = RenderOptions {
        export_dir: dir.path(),
        identity: &identity,
        today: day(2026, 1, 29),
    };
    let outcome = render_template(&template, &options).expect("render");

    let written = update_template_file(
        &outcome.template,
        &outcome.template_source,
        &outcome.config_version.to_string(),
    )
    .unwrap();

    assert!(written);
    assert_eq!(
        fs::read_to_string(&template).unwrap(),
        TEMPLATE.replace("'2026.1.29-3'", "'2026.1.29-4'")
    );
}

#[test]
fn template_lookup_prefers_variant_across_dirs() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join("yustar.template.json5"), "{}").unwrap();
    fs::write(second.path().join("yustar_tw.template.json5"), "{}").unwrap();
    let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];

    let tw = locate_template(&dirs, &MethodIdentity::new("yustar").with_variant(Some("tw".into())))
        .unwrap();
    assert_eq!(tw.path, second.path().join("yustar_tw.template.json5"));

    let hk = locate_template(&dirs, &MethodIdentity::new("yustar").with_variant(Some("hk".into())))
        .unwrap();
    assert_eq!(hk.path, first.path().join("yustar.template.json5"));
    assert!(hk.is_fallback(Some("hk")));

    let variants = discover_template_variants(&dirs, "yustar").unwrap();
    assert_eq!(variants.into_iter().collect::<Vec<_>>(), vec!["tw".to_string()]);
}

#[test]
fn missing_template_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = locate_template(&[dir.path().to_path_buf()], &MethodIdentity::new("yuhao"))
        .unwrap_err();
    assert!(matches!(err, TemplateError::NotFound { ref method, .. } if method == "yuhao"));
    assert!(err.to_string().contains("yuhao.template.json5"));
}
