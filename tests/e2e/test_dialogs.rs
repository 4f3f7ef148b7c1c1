use crate::e2e::helpers;

use helpers::fixtures::DialogSeed;
use helpers::{BrokenTtsContext, TestContext};
use hyper::StatusCode;
use leveltalk_backend::domain::dialog::{CefrLevel, Dialog};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;
use uuid::Uuid;

// ==================== Create ====================

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_dialog_from_raw_vocabulary(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/dialogs",
            &json!({
                "input_language": "ru",
                "dialog_language": "es",
                "cefr_level": "a1",
                "input_words": "casa, perro\n\n gato ,"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let dialog: Dialog = response.json().unwrap();
    assert_eq!(dialog.cefr_level, CefrLevel::A1);
    assert_eq!(dialog.input_words, vec!["casa", "perro", "gato"]);
    assert_eq!(dialog.turns.len(), 4);
    assert!(!dialog.title.is_empty());

    for (i, turn) in dialog.turns.iter().enumerate() {
        assert_eq!(turn.position, i as i32);
        assert!(!turn.id.is_nil());
        assert!(!turn.audio_url.is_empty());
    }

    // Every vocabulary word has an entry even when the generator gave no translation
    for word in &dialog.input_words {
        assert!(dialog.translations.contains_key(word));
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_dialog_from_word_list(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/dialogs",
            &json!({
                "input_language": "en",
                "dialog_language": "fi",
                "cefr_level": "B2",
                "input_words": ["sauna", "järvi", "sauna", "talvi", "kahvi"]
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let dialog: Dialog = response.json().unwrap();
    assert_eq!(dialog.input_words.len(), 5);
    assert_eq!(dialog.turns.len(), 5);
    assert_eq!(dialog.turns[0].speaker, "Ana");
    assert_eq!(dialog.turns[1].speaker, "Luis");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_persist_created_dialog(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/dialogs",
            &json!({
                "input_language": "ru",
                "dialog_language": "es",
                "cefr_level": "B1",
                "input_words": "playa, sol"
            }),
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::CREATED);
    let created: Dialog = response.json().unwrap();

    let response = ctx
        .client
        .get(&format!("/api/dialogs/{}", created.id))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let fetched: Dialog = response.json().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.title, created.title);
    assert_eq!(fetched.input_words, created.input_words);
    assert_eq!(fetched.translations, created.translations);
    assert_eq!(fetched.turns.len(), created.turns.len());
    for (a, b) in fetched.turns.iter().zip(created.turns.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.position, b.position);
        assert_eq!(a.speaker, b.speaker);
        assert_eq!(a.text, b.text);
        assert_eq!(a.audio_url, b.audio_url);
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_vocabulary(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/dialogs",
            &json!({
                "input_language": "ru",
                "dialog_language": "es",
                "cefr_level": "A1",
                "input_words": " ,\n, "
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("at least one input word is required");

    assert_eq!(ctx.fixtures.count_dialogs().await.unwrap(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_cefr_level(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/dialogs",
            &json!({
                "input_language": "ru",
                "dialog_language": "es",
                "cefr_level": "D1",
                "input_words": "casa"
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("unknown CEFR level");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_languages(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/dialogs",
            &json!({
                "dialog_language": "es",
                "cefr_level": "A1",
                "input_words": "casa"
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("input_language and dialog_language are required");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_entry_in_word_list(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/dialogs",
            &json!({
                "input_language": "ru",
                "dialog_language": "es",
                "cefr_level": "A1",
                "input_words": ["casa", "  "]
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("empty word provided");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_answer_malformed_json_with_a_message_body(ctx: &TestContext) {
    let response = ctx.client.post_raw("/api/dialogs", "{not json").await.unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid input");

    let response = ctx
        .client
        .post_raw("/api/dialogs", r#"{"input_words": 5}"#)
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid input");

    assert_eq!(ctx.fixtures.count_dialogs().await.unwrap(), 0);
}

#[test_context(BrokenTtsContext)]
#[tokio::test]
async fn it_should_not_store_dialog_when_synthesis_fails(ctx: &BrokenTtsContext) {
    let ctx = &ctx.inner;

    let response = ctx
        .client
        .post(
            "/api/dialogs",
            &json!({
                "input_language": "ru",
                "dialog_language": "es",
                "cefr_level": "A2",
                "input_words": "casa, perro"
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("Audio synthesis failed");

    assert_eq!(ctx.fixtures.count_dialogs().await.unwrap(), 0);
    assert_eq!(ctx.fixtures.count_turns().await.unwrap(), 0);
}

// ==================== Get ====================

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_for_unknown_dialog(ctx: &TestContext) {
    let response = ctx
        .client
        .get(&format!("/api/dialogs/{}", Uuid::new_v4()))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Dialog not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_400_for_malformed_dialog_id(ctx: &TestContext) {
    let response = ctx.client.get("/api/dialogs/12345").await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("invalid dialog id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_turns_in_position_order(ctx: &TestContext) {
    let mut seed = DialogSeed::new("Ordered");
    seed.turns = (0..6)
        .map(|i| (format!("S{}", i % 2), format!("line {}", i)))
        .collect();
    let seeded = ctx.fixtures.create_dialog(seed).await.unwrap();

    let response = ctx
        .client
        .get(&format!("/api/dialogs/{}", seeded.id))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let dialog: Dialog = response.json().unwrap();
    let texts: Vec<&str> = dialog.turns.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["line 0", "line 1", "line 2", "line 3", "line 4", "line 5"]
    );
}

// ==================== Search ====================

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_newest_dialogs_first(ctx: &TestContext) {
    ctx.fixtures
        .create_dialog(DialogSeed::new("Oldest").minutes_ago(30))
        .await
        .unwrap();
    ctx.fixtures
        .create_dialog(DialogSeed::new("Newest").minutes_ago(1))
        .await
        .unwrap();
    ctx.fixtures
        .create_dialog(DialogSeed::new("Middle").minutes_ago(10))
        .await
        .unwrap();

    let response = ctx.client.get("/api/dialogs").await.unwrap();
    response.assert_status(StatusCode::OK);

    let dialogs: Vec<Dialog> = response.json().unwrap();
    let titles: Vec<&str> = dialogs.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    assert!(dialogs.iter().all(|d| !d.turns.is_empty()));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_filter_dialogs_by_languages_and_level(ctx: &TestContext) {
    ctx.fixtures
        .create_dialog(DialogSeed::new("ru-es A2"))
        .await
        .unwrap();
    ctx.fixtures
        .create_dialog(DialogSeed::new("ru-es B1").level(CefrLevel::B1))
        .await
        .unwrap();
    ctx.fixtures
        .create_dialog(DialogSeed::new("en-fi A2").languages("en", "fi"))
        .await
        .unwrap();

    let response = ctx
        .client
        .get("/api/dialogs?input_language=ru&dialog_language=es&cefr_level=b1")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let dialogs: Vec<Dialog> = response.json().unwrap();
    assert_eq!(dialogs.len(), 1);
    assert_eq!(dialogs[0].title, "ru-es B1");

    let response = ctx
        .client
        .get("/api/dialogs?dialog_language=fi")
        .await
        .unwrap();
    let dialogs: Vec<Dialog> = response.json().unwrap();
    assert_eq!(dialogs.len(), 1);
    assert_eq!(dialogs[0].title, "en-fi A2");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_page_through_dialogs(ctx: &TestContext) {
    for i in 0..5 {
        ctx.fixtures
            .create_dialog(DialogSeed::new(&format!("Dialog {}", i)).minutes_ago(i))
            .await
            .unwrap();
    }

    let response = ctx.client.get("/api/dialogs?limit=2").await.unwrap();
    let first_page: Vec<Dialog> = response.json().unwrap();
    assert_eq!(first_page.len(), 2);
    assert_eq!(first_page[0].title, "Dialog 0");

    let response = ctx
        .client
        .get("/api/dialogs?limit=2&offset=4")
        .await
        .unwrap();
    let last_page: Vec<Dialog> = response.json().unwrap();
    assert_eq!(last_page.len(), 1);
    assert_eq!(last_page[0].title, "Dialog 4");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_empty_list_when_nothing_matches(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/dialogs?dialog_language=xx")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let dialogs: Vec<Dialog> = response.json().unwrap();
    assert!(dialogs.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_level_filter(ctx: &TestContext) {
    let response = ctx.client.get("/api/dialogs?cefr_level=Z9").await.unwrap();
    response.assert_status(StatusCode::BAD_REQUEST);
}

// ==================== Export ====================

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_export_selected_dialogs_as_text(ctx: &TestContext) {
    let first = ctx
        .fixtures
        .create_dialog(DialogSeed::new("At the market"))
        .await
        .unwrap();
    ctx.fixtures
        .create_dialog(DialogSeed::new("Not selected"))
        .await
        .unwrap();

    let response = ctx
        .client
        .get(&format!("/api/dialogs/export/text?ids={}", first.id))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.header("content-type"),
        Some("text/plain; charset=utf-8")
    );
    let disposition = response.header("content-disposition").unwrap();
    assert!(disposition.starts_with("attachment; filename=leveltalk-dialogs-"));
    assert!(disposition.ends_with(".txt"));

    let body = response.text();
    assert!(body.starts_with("LevelTalk Dialog Export\n"));
    assert!(body.contains("Total dialogs: 1"));
    assert!(body.contains("Dialog 1: At the market"));
    assert!(body.contains(&format!("ID: {}", first.id)));
    assert!(body.contains("  casa → casa-tr"));
    assert!(body.contains("Ana: Hola, ¿tienes perro?"));
    assert!(!body.contains("Not selected"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_export_filtered_dialogs_newest_first(ctx: &TestContext) {
    ctx.fixtures
        .create_dialog(DialogSeed::new("Older B1").level(CefrLevel::B1).minutes_ago(20))
        .await
        .unwrap();
    ctx.fixtures
        .create_dialog(DialogSeed::new("Newer B1").level(CefrLevel::B1).minutes_ago(2))
        .await
        .unwrap();
    ctx.fixtures
        .create_dialog(DialogSeed::new("Other A2"))
        .await
        .unwrap();

    let response = ctx
        .client
        .get("/api/dialogs/export/text?cefr_level=B1")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.text();
    assert!(body.contains("Total dialogs: 2"));
    assert!(body.contains("Dialog 1: Newer B1"));
    assert!(body.contains("Dialog 2: Older B1"));
    assert!(!body.contains("Other A2"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_when_export_has_no_dialogs(ctx: &TestContext) {
    let response = ctx
        .client
        .get(&format!("/api/dialogs/export/text?ids={},not-an-id", Uuid::new_v4()))
        .await
        .unwrap();
    response.assert_status(StatusCode::NOT_FOUND);

    let response = ctx.client.get("/api/dialogs/export/text").await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_on_dialog_routes(ctx: &TestContext) {
    let response = ctx.client.get("/api/dialogs").await.unwrap();
    response.assert_header_exists("x-request-id");
}
