#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::fs;

use catalog_core::{
    AdminEditor, CatalogSource, Config, DatasetKind, Exporter, Favourite, Loader, Query, Section,
    query, render,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOOLS: &str = r#"[
    {"name": "Alpha", "icon": "🤖", "link": "https://alpha.example", "description": "Writing helper",
     "category": "writing", "pricing": "freemium", "personal_favourite": "yes"},
    {"name": "Beta", "icon": "🧪", "link": "https://beta.example", "description": "Coding helper",
     "category": "coding"}
]"#;

const LEARNING: &str = r#"[
    {"name": "Prompting 101", "icon": "📘", "link": "https://learn.example", "description": "Basics",
     "category": "prompting", "difficulty": "beginner", "type": "course"}
]"#;

const MCP: &str = r#"[
    {"name": "Files", "icon": "📁", "link": "https://files.example", "description": "Filesystem access",
     "category": "filesystem", "pricing": "free"}
]"#;

fn write_catalog(dir: &TempDir) {
    fs::write(dir.path().join("tools.json"), TOOLS).unwrap();
    fs::write(dir.path().join("learning.json"), LEARNING).unwrap();
    fs::write(dir.path().join("mcp.json"), MCP).unwrap();
}

#[tokio::test]
async fn loads_all_datasets_from_directory() {
    let dir = TempDir::new().unwrap();
    write_catalog(&dir);

    let mut config = Config::default();
    config.source.location = dir.path().display().to_string();
    let store = Loader::new(&config).unwrap().load_all().await;

    assert_eq!(store.tools().len(), 2);
    assert_eq!(store.learning().len(), 1);
    assert_eq!(store.mcp_servers().len(), 1);
    assert_eq!(store.tools().records()[0].personal_favourite, Favourite::Yes);
    assert!(DatasetKind::ALL.iter().all(|kind| store.failure_of(*kind).is_none()));
}

#[tokio::test]
async fn missing_file_fails_only_its_dataset() {
    let dir = TempDir::new().unwrap();
    write_catalog(&dir);
    fs::remove_file(dir.path().join("learning.json")).unwrap();

    let loader = Loader::with_source(
        CatalogSource::Directory(dir.path().to_path_buf()),
        &Config::default(),
    )
    .unwrap();
    let store = loader.load_all().await;

    assert_eq!(store.tools().len(), 2);
    assert_eq!(store.mcp_servers().len(), 1);
    let failure = store.failure_of(DatasetKind::Learning).unwrap();
    assert_eq!(failure.message, "Error loading learning resources. Please try again.");

    let view = render::render_dataset(&store, DatasetKind::Learning, &Query::default());
    assert_eq!(view.section, Section::Learning);
    assert!(view.grids.is_empty());
    assert!(view.error.is_some());
}

#[tokio::test]
async fn loads_remote_catalog_with_partial_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog/tools.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TOOLS))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/catalog/learning.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LEARNING))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/catalog/mcp.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = CatalogSource::parse(&format!("{}/catalog", server.uri())).unwrap();
    let store = Loader::with_source(source, &Config::default())
        .unwrap()
        .load_all()
        .await;

    assert_eq!(store.tools().len(), 2);
    assert_eq!(store.learning().len(), 1);
    assert!(store.mcp_servers().is_empty());
    assert!(store.failure_of(DatasetKind::McpServers).is_some());
    assert_eq!(query::categories(store.tools().records()), ["coding", "writing"]);
}

#[tokio::test]
async fn malformed_remote_document_is_a_load_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tools.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"tools": []}"#))
        .mount(&server)
        .await;

    let source = CatalogSource::parse(&server.uri()).unwrap();
    let store = Loader::with_source(source, &Config::default())
        .unwrap()
        .load_all()
        .await;

    let failure = store.failure_of(DatasetKind::Tools).unwrap();
    assert!(failure.cause.contains("Invalid format"));
    // The other two files are not mounted and answer 404.
    assert!(store.failure_of(DatasetKind::Learning).is_some());
}

#[tokio::test]
async fn exported_collection_loads_back_unchanged() {
    let dir = TempDir::new().unwrap();
    write_catalog(&dir);
    let mut config = Config::default();
    config.source.location = dir.path().display().to_string();
    let store = Loader::new(&config).unwrap().load_all().await;

    let out = TempDir::new().unwrap();
    let mut editor = AdminEditor::new(config.admin.clone());
    editor.select_dataset(DatasetKind::Learning);
    let status = editor.save(&store, &mut Exporter::download(out.path().to_path_buf()));
    assert!(status.is_success(), "{status:?}");

    let mut reloaded_config = Config::default();
    reloaded_config.source.location = out.path().display().to_string();
    let reloaded = Loader::new(&reloaded_config).unwrap().load_all().await;
    assert_eq!(reloaded.learning().records(), store.learning().records());
}
