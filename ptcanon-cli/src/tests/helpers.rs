//! Test helpers for writing network configurations and inputs to disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

use crate::selection::Selection;

pub(super) const NETWORKS: &str = r##"{
    "shared": {
        "styles": { "UU1": { "shape": "rect", "background": "#7dad4c" } }
    },
    "networks": [
        {
            "id": "demo",
            "product_index": ["SUBURBAN_TRAIN", "SUBWAY", "BUS", "REGIONAL_TRAIN"],
            "names": {
                "station": { "template": { "split": "first_comma", "order": "place_first" } },
                "address": { "template": { "split": "last_comma", "order": "name_first" } }
            },
            "styles": {
                "demo|B100": { "shape": "rounded", "background": "#ffcc00" }
            }
        }
    ]
}"##;

pub(super) const LINES: &str = r#"[
    { "mode": 1, "symbol": "U1" },
    { "mode": 2, "symbol": "100", "long_name": "Bahnhof - Zentrum" },
    { "mode": 9, "symbol": "X9" }
]"#;

pub(super) const NAMES: &str = r#"["Berlin, Alexanderplatz", "Zoo"]"#;

pub(super) const STYLE_KEYS: &str = r#"["UU1", "demo|B100", "ZZ"]"#;

/// Temporary directory holding a network configuration and input files.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let workspace = Self { _dir: dir, root };
        workspace.write("networks.json", NETWORKS);
        workspace
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(name);
        fs::write(path.as_std_path(), contents).expect("write workspace file");
        path
    }

    pub(super) fn networks(&self) -> Utf8PathBuf {
        self.root.join("networks.json")
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Select the `demo` network with `input` as the input document.
    pub(super) fn selection(&self, input: Utf8PathBuf) -> Selection {
        Selection {
            input,
            networks: self.networks(),
            network: "demo".to_owned(),
        }
    }
}
