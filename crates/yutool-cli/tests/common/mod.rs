//! Release fixtures shared by the CLI tests.

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const CUSTOM_CONFIG: &str = "\
# Rime default settings
patch:
  schema_list:
    - schema: yustar_tw
    - schema: yustar
";

pub const ROOTS: &str = "\
# roots of 星陳
+ ga x 土士 /lmG
- ignored line
+ a x 口 /lmH
";

pub const QUICK: &str = "你好\tni\n我\two\nhello\tABC\n";

pub const TEMPLATE: &str = r#"{
  // practice configuration
  name: "星陳",
  version: "v0.0.1",
  config_version: "2026.1.29-3",
  items_meta: [{ category: ["roots"] }],
  tabs: [{ label: "字根", type: "roots", beg: 0, end: 0 }],
  help: "",
}
"#;

pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        for (name, contents) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    fs::write(path, buffer).unwrap();
}

/// `<dir>/yustar_v1.zip` with roots and quick dictionaries but no pop file.
/// Entries in `extra` are added, replacing default entries of the same name.
pub fn minimal_release(dir: &Path, extra: &[(&str, &str)]) -> PathBuf {
    let archive = dir.join("yustar_v1.zip");
    let mut entries: Vec<(&str, &str)> = [
        ("schema/default.custom.yaml", CUSTOM_CONFIG),
        ("schema/yuhao/yustar.roots.dict.yaml", ROOTS),
        ("schema/yuhao/yustar.quick.dict.yaml", QUICK),
    ]
    .into_iter()
    .filter(|(name, _)| !extra.iter().any(|(other, _)| other == name))
    .collect();
    entries.extend_from_slice(extra);
    write_zip(&archive, &entries);
    archive
}

/// A template directory holding `yustar.template.json5`.
pub fn template_dir(dir: &Path) -> PathBuf {
    let templates = dir.join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("yustar.template.json5"), TEMPLATE).unwrap();
    templates
}
