use product_core::{
    update, AppState, Effect, Msg, Notification, NotificationLevel, Product, RequestFailure,
    SCRAPE_SUCCESS_MESSAGE,
};

fn init_logging() {
    product_logging::initialize_for_tests();
}

fn product(id: u64, url: &str) -> Product {
    Product {
        id,
        title: Some("Kettle".to_string()),
        price: Some("$20".to_string()),
        category: Some("Home".to_string()),
        description: Some("Steel kettle".to_string()),
        url: url.to_string(),
        contact: None,
        size: None,
        updated_at: None,
        created_at: None,
    }
}

fn submit_url(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::UrlInputChanged(input.to_string()));
    update(state, Msg::ScrapeSubmitted)
}

#[test]
fn empty_and_whitespace_urls_issue_no_call() {
    init_logging();
    for input in ["", "   ", "\t\n"] {
        let (state, effects) = submit_url(AppState::new(), input);
        assert!(effects.is_empty(), "input {input:?} produced {effects:?}");
        assert!(!state.view().form.submitting);
    }
}

#[test]
fn submit_emits_scrape_and_disables_resubmission() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "http://example.com/p/1");

    assert_eq!(
        effects,
        vec![Effect::Scrape {
            url: "http://example.com/p/1".to_string(),
            force: false,
        }]
    );
    let view = state.view();
    assert!(view.form.submitting);
    assert_eq!(view.form.button_label, "Scraping...");

    let (state, effects) = update(state, Msg::ScrapeSubmitted);
    assert!(effects.is_empty());
    assert!(state.view().form.submitting);
}

#[test]
fn force_flag_travels_with_the_submission() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::ForceToggled);
    let (_state, effects) = submit_url(state, "http://example.com/p/2");

    assert_eq!(
        effects,
        vec![Effect::Scrape {
            url: "http://example.com/p/2".to_string(),
            force: true,
        }]
    );
}

#[test]
fn success_clears_field_and_refreshes_unfiltered_once() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "http://x");
    let (state, effects) = update(
        state,
        Msg::ScrapeFinished {
            url: "http://x".to_string(),
            result: Ok(product(1, "http://x")),
        },
    );

    assert_eq!(
        effects,
        vec![
            Effect::FetchProducts { query: None },
            Effect::Notify(Notification::success(SCRAPE_SUCCESS_MESSAGE)),
        ]
    );
    let view = state.view();
    assert_eq!(view.form.url, "");
    assert!(!view.form.submitting);
    assert_eq!(view.form.button_label, "Scrape & Save");
}

#[test]
fn post_scrape_refresh_drops_active_search_filter() {
    // Pins current behaviour: the refresh after a scrape ignores the search box.
    init_logging();
    let (state, _) = update(AppState::new(), Msg::SearchInputChanged("lamp".to_string()));
    let (state, _) = submit_url(state, "http://x");
    let (state, effects) = update(
        state,
        Msg::ScrapeFinished {
            url: "http://x".to_string(),
            result: Ok(product(1, "http://x")),
        },
    );

    assert!(effects.contains(&Effect::FetchProducts { query: None }));
    assert_eq!(state.view().search.query, "lamp");
}

#[test]
fn server_error_notifies_and_keeps_typed_url() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "http://example.com/p/1");
    let (state, effects) = update(
        state,
        Msg::ScrapeFinished {
            url: "http://example.com/p/1".to_string(),
            result: Err(RequestFailure::api("invalid url")),
        },
    );

    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::Notify(note) => {
            assert_eq!(note.level, NotificationLevel::Error);
            assert!(note.message.contains("invalid url"));
        }
        other => panic!("expected notification, got {other:?}"),
    }
    let view = state.view();
    assert_eq!(view.form.url, "http://example.com/p/1");
    assert!(!view.form.submitting);
}

#[test]
fn transport_error_is_reported_without_refresh() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "http://x");
    let (_state, effects) = update(
        state,
        Msg::ScrapeFinished {
            url: "http://x".to_string(),
            result: Err(RequestFailure::transport("connection refused")),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::error(
            "Error: connection refused"
        ))]
    );
}

#[test]
fn stray_result_without_submission_is_ignored() {
    init_logging();
    let (mut state, effects) = update(
        AppState::new(),
        Msg::ScrapeFinished {
            url: "http://x".to_string(),
            result: Ok(product(1, "http://x")),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}
