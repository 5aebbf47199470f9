//! Integration tests for the docs sync jobs
//!
//! These tests run the seeder and the translator back to back against a
//! temporary project tree, with DeepL replaced by a wiremock server.

use docs_i18n_sync::{
    config::{Config, DeeplConfig},
    deepl::DeeplClient,
    marker::{sha256_hex, TrackingMarker},
    project::ProjectInfo,
    seeder, translator,
};
use tempfile::TempDir;
use wiremock::{
    matchers::{body_string_contains, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

// ==================== Test Helpers ====================

/// Create a project with `plugin_info/info.json` and French source docs
fn create_project(languages: &[&str], docs: &[(&str, &str)]) -> (TempDir, Config) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config::new(temp_dir.path(), "fr_FR");

    let info_file = config.info_file();
    std::fs::create_dir_all(info_file.parent().expect("parent")).expect("mkdir");
    std::fs::write(
        &info_file,
        serde_json::json!({ "id": "demo", "language": languages }).to_string(),
    )
    .expect("Failed to write info.json");

    std::fs::create_dir_all(config.source_dir()).expect("mkdir");
    for (rel, content) in docs {
        write_source(&config, rel, content);
    }

    (temp_dir, config)
}

fn write_source(config: &Config, rel: &str, content: &str) {
    let path = config.source_dir().join(rel);
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(path, content).expect("Failed to write source doc");
}

fn read_target(config: &Config, lang: &str, rel: &str) -> String {
    std::fs::read_to_string(config.locale_dir(lang).join(rel)).expect("Failed to read target doc")
}

fn create_deepl_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "translations": [{ "detected_source_language": "FR", "text": text }]
    })
}

fn create_client(server: &MockServer) -> DeeplClient {
    DeeplClient::new(&DeeplConfig::new("test-key:fx", Some(server.uri()))).expect("client")
}

fn target_locales(config: &Config) -> Vec<String> {
    ProjectInfo::load(&config.info_file())
        .expect("info")
        .target_locales(&config.source_lang)
        .into_iter()
        .map(str::to_string)
        .collect()
}

async fn run_seeder_and_translator(config: &Config, client: &DeeplClient) -> translator::TranslateReport {
    let owned = target_locales(config);
    let locales: Vec<&str> = owned.iter().map(String::as_str).collect();

    seeder::seed_structure(config, &locales).expect("seed");
    translator::translate_tree(config, &locales, client)
        .await
        .expect("translate")
}

// ==================== Scenario Tests ====================

#[tokio::test]
async fn test_seed_then_translate_guide() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .and(header("Authorization", "DeepL-Auth-Key test-key:fx"))
        .and(body_string_contains("target_lang=EN-US"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(create_deepl_response("# Title\n\nHello.")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (_temp_dir, config) =
        create_project(&["fr_FR", "en_US"], &[("guide.md", "# Titre\n\nBonjour.")]);
    let locales = ["en_US"];

    seeder::seed_structure(&config, &locales).expect("seed");
    assert_eq!(
        read_target(&config, "en_US", "guide.md"),
        "<!-- AUTO_TRANSLATED source=fr_FR src_sha256=TODO out_sha256=TODO -->\n\n# Titre\n\nBonjour."
    );

    translator::translate_tree(&config, &locales, &create_client(&mock_server))
        .await
        .expect("translate");

    let written = read_target(&config, "en_US", "guide.md");
    let (marker, body) = TrackingMarker::parse(&written).expect("marker");
    assert_eq!(marker.source, "fr_FR");
    assert_eq!(marker.src_sha256, Some(sha256_hex("# Titre\n\nBonjour.")));
    assert_eq!(marker.out_sha256, Some(sha256_hex("# Title\n\nHello.")));
    assert_eq!(body, "# Title\n\nHello.");
    assert!(written.starts_with(&format!(
        "<!-- AUTO_TRANSLATED source=fr_FR src_sha256={} out_sha256={} -->\n\n",
        sha256_hex("# Titre\n\nBonjour."),
        sha256_hex("# Title\n\nHello.")
    )));
}

#[tokio::test]
async fn test_second_translator_run_makes_no_calls() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_deepl_response("Hello.")))
        .expect(2) // one per locale, first run only
        .mount(&mock_server)
        .await;

    let (_temp_dir, config) = create_project(&["fr_FR", "en_US", "de_DE"], &[("a.md", "Bonjour.")]);
    let client = create_client(&mock_server);

    let first = run_seeder_and_translator(&config, &client).await;
    assert_eq!(first.translated.len(), 2);

    let before = read_target(&config, "de_DE", "a.md");
    let second = run_seeder_and_translator(&config, &client).await;
    assert!(second.translated.is_empty());
    assert_eq!(second.up_to_date, 2);
    assert_eq!(read_target(&config, "de_DE", "a.md"), before);
}

#[tokio::test]
async fn test_source_change_triggers_retranslation() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .and(body_string_contains("Version+1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_deepl_response("Release 1")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .and(body_string_contains("Version+2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_deepl_response("Release 2")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (_temp_dir, config) = create_project(&["fr_FR", "en_US"], &[("notes.md", "Version 1")]);
    let client = create_client(&mock_server);

    run_seeder_and_translator(&config, &client).await;
    write_source(&config, "notes.md", "Version 2");
    let report = run_seeder_and_translator(&config, &client).await;

    assert_eq!(report.translated.len(), 1);
    let written = read_target(&config, "en_US", "notes.md");
    let (marker, body) = TrackingMarker::parse(&written).expect("marker");
    assert_eq!(body, "Release 2");
    assert_eq!(marker.src_sha256, Some(sha256_hex("Version 2")));
}

#[tokio::test]
async fn test_hand_edit_freezes_file() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_deepl_response("Hello.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (_temp_dir, config) = create_project(&["fr_FR", "en_US"], &[("guide.md", "Bonjour.")]);
    let client = create_client(&mock_server);

    run_seeder_and_translator(&config, &client).await;

    let target = config.locale_dir("en_US").join("guide.md");
    let edited = read_target(&config, "en_US", "guide.md").replace("Hello.", "Hello there, reviewed.");
    std::fs::write(&target, &edited).expect("write");
    write_source(&config, "guide.md", "Bonjour à tous.");

    let report = run_seeder_and_translator(&config, &client).await;

    assert_eq!(report.hand_edited, vec![target]);
    assert_eq!(read_target(&config, "en_US", "guide.md"), edited);
}

#[tokio::test]
async fn test_code_blocks_survive_translation() {
    let mock_server = MockServer::start().await;
    // DeepL only ever sees the placeholder, never the code itself
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .and(body_string_contains("__CODE_BLOCK_0__"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_deepl_response(
            "Install:\n\n__CODE_BLOCK_0__\n\nDone.",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let code = "```bash\n# installer le plugin\nmake install PREFIX=/usr\n```";
    let source = format!("Installation :\n\n{}\n\nTerminé.", code);
    let (_temp_dir, config) = create_project(&["fr_FR", "en_US"], &[("install.md", source.as_str())]);

    run_seeder_and_translator(&config, &create_client(&mock_server)).await;

    let written = read_target(&config, "en_US", "install.md");
    let (_, body) = TrackingMarker::parse(&written).expect("marker");
    assert_eq!(body, format!("Install:\n\n{}\n\nDone.", code));
}

#[tokio::test]
async fn test_hand_authored_target_is_left_alone() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_deepl_response("x")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (_temp_dir, config) = create_project(&["fr_FR", "es_ES"], &[("faq.md", "Questions")]);
    let target = config.locale_dir("es_ES").join("faq.md");
    std::fs::create_dir_all(target.parent().expect("parent")).expect("mkdir");
    std::fs::write(&target, "Preguntas escritas a mano").expect("write");

    let report = run_seeder_and_translator(&config, &create_client(&mock_server)).await;

    assert_eq!(report.no_marker, 1);
    assert_eq!(read_target(&config, "es_ES", "faq.md"), "Preguntas escritas a mano");
}

#[test]
fn test_seeder_requires_source_folder() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config::new(temp_dir.path(), "fr_FR");

    let err = seeder::seed_structure(&config, &["en_US"]).unwrap_err();
    assert!(err.to_string().contains("fr_FR"));
}
