#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

#[allow(dead_code)]
pub const TOOLS: &str = r#"[
  {"name": "Alpha", "icon": "🤖", "link": "https://alpha.example", "description": "Writing helper",
   "category": "writing", "pricing": "freemium", "pricingNote": "5 docs free", "personal_favourite": "yes"},
  {"name": "Beta", "icon": "🧪", "link": "https://beta.example", "description": "Coding helper",
   "category": "coding", "pricing": "paid"},
  {"name": "Gamma", "icon": "🎨", "link": "https://gamma.example", "description": "Image maker",
   "category": "image-generation"}
]"#;

#[allow(dead_code)]
pub const LEARNING: &str = r#"[
  {"name": "Prompting 101", "icon": "📘", "link": "https://learn.example", "description": "Basics",
   "category": "prompting", "difficulty": "beginner", "type": "course"}
]"#;

#[allow(dead_code)]
pub const MCP: &str = r#"[
  {"name": "Files", "icon": "📁", "link": "https://files.example", "description": "Filesystem access",
   "category": "filesystem", "pricing": "free"}
]"#;

/// A catalog directory holding the three fixture datasets, plus an empty config file.
#[allow(dead_code)]
pub struct Fixture {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create catalog dir for tests");
        fs::write(dir.path().join("tools.json"), TOOLS).unwrap();
        fs::write(dir.path().join("learning.json"), LEARNING).unwrap();
        fs::write(dir.path().join("mcp.json"), MCP).unwrap();
        fs::write(dir.path().join("config.toml"), "").unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A configured `catalog` command reading this fixture.
    pub fn cmd(&self) -> Command {
        catalog_cmd(self.path())
    }
}

/// Create a configured `catalog` command suitable for integration tests.
#[allow(dead_code)]
pub fn catalog_cmd(data: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("catalog"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("CATALOG_DATA", data);
    cmd.env("CATALOG_CONFIG", data.join("config.toml"));
    cmd.env("CATALOG_NON_INTERACTIVE", "1");
    cmd.env_remove("CATALOG_OUTPUT_FORMAT");
    cmd.env("NO_COLOR", "1");
    cmd
}
