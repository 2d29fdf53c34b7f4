//! Rendering and keyboard tests for the terminal console
//!
//! Screens are drawn into a `TestBackend` and checked for the text an
//! operator would see.

mod common;

use common::{FakeAdminApi, metrics_for, request, service};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gate9s::api::AdminApi;
use gate9s::config::Config;
use gate9s::models::{Protocol, TraceEntry, TraceLevel};
use gate9s::poller::PollIntervals;
use gate9s::services::ConsoleSession;
use gate9s::store::{ConsoleView, ResourceStore};
use gate9s::tui::{App, Theme};
use ratatui::{Terminal, backend::TestBackend};
use std::sync::Arc;

async fn app_with(api: FakeAdminApi, view: ConsoleView, page_size: usize) -> (App, Arc<FakeAdminApi>) {
    let api = Arc::new(api);
    let dyn_api: Arc<dyn AdminApi> = api.clone();
    let session =
        ConsoleSession::with_api(dyn_api, ResourceStore::new(), PollIntervals::default(), view);
    session.refresh().await;

    let mut config = Config::default();
    config.ui.page_size = page_size;
    (App::new(session, config, Theme::default()), api)
}

fn screen(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    terminal.backend().to_string()
}

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Let background tasks finish and apply their results
async fn settle(app: &mut App) {
    for _ in 0..50 {
        tokio::task::yield_now().await;
        app.drain_events();
    }
}

fn two_services() -> FakeAdminApi {
    FakeAdminApi::new().with_services(vec![
        service(1, "web", Protocol::Rest),
        service(2, "billing", Protocol::Grpc),
    ])
}

#[tokio::test]
async fn test_services_table_renders() {
    let (mut app, _) = app_with(two_services(), ConsoleView::Services, 10).await;
    let out = screen(&mut app, 120, 30);

    assert!(out.contains("gate9s"));
    assert!(out.contains("Services (2) page 1/1"));
    assert!(out.contains("billing"));
    assert!(out.contains("billing:9090"));
    assert!(out.contains("http://web:8080"));
    assert!(out.contains("Proto Mappings"));
}

#[tokio::test]
async fn test_narrow_terminal_shows_warning() {
    let (mut app, _) = app_with(two_services(), ConsoleView::Services, 10).await;
    let out = screen(&mut app, 60, 20);
    assert!(out.contains("Terminal too narrow"));
    assert!(!out.contains("billing"));
}

#[tokio::test]
async fn test_paging_through_seventeen_services() {
    let services = (1..=17)
        .map(|i| service(i, &format!("svc-{:02}", i), Protocol::Rest))
        .collect();
    let (mut app, _) = app_with(
        FakeAdminApi::new().with_services(services),
        ConsoleView::Services,
        6,
    )
    .await;

    let out = screen(&mut app, 120, 30);
    assert!(out.contains("page 1/3"));
    assert!(out.contains("svc-06"));
    assert!(!out.contains("svc-07"));

    press(&mut app, KeyCode::Char('n'));
    press(&mut app, KeyCode::Char('n'));
    press(&mut app, KeyCode::Char('n'));
    let out = screen(&mut app, 120, 30);
    assert!(out.contains("page 3/3"));
    assert!(out.contains("svc-17"));
    assert!(!out.contains("svc-12"));
}

#[tokio::test]
async fn test_search_narrows_table() {
    let (mut app, _) = app_with(two_services(), ConsoleView::Services, 10).await;

    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "bil");
    assert!(app.is_search_mode());
    press(&mut app, KeyCode::Enter);
    assert!(!app.is_search_mode());

    let out = screen(&mut app, 120, 30);
    assert!(out.contains("Services (1) /bil"));
    assert!(!out.contains("http://web:8080"));

    press(&mut app, KeyCode::Char('/'));
    press(&mut app, KeyCode::Esc);
    let out = screen(&mut app, 120, 30);
    assert!(out.contains("Services (2)"));
}

#[tokio::test]
async fn test_create_form_opens_and_cancels() {
    let (mut app, api) = app_with(two_services(), ConsoleView::Services, 10).await;

    press(&mut app, KeyCode::Char('a'));
    assert!(app.crud().is_active());
    let out = screen(&mut app, 120, 30);
    assert!(out.contains("New service"));
    assert!(out.contains("Base URL"));

    // Enter on an empty form fails validation and stays open
    press(&mut app, KeyCode::Enter);
    settle(&mut app).await;
    let out = screen(&mut app, 120, 30);
    assert!(out.contains("missing required fields"));
    assert_eq!(api.mutation_count(), 0);

    press(&mut app, KeyCode::Esc);
    assert!(!app.crud().is_active());
}

#[tokio::test]
async fn test_create_form_submits_and_refreshes() {
    let (mut app, api) = app_with(two_services(), ConsoleView::Services, 10).await;

    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "ledger");
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Tab);
    assert_eq!(
        app.focused_field(),
        Some(gate9s::crud::FormField::GrpcAddress)
    );
    type_text(&mut app, "ledger:9090");
    press(&mut app, KeyCode::Enter);
    settle(&mut app).await;

    assert!(!app.crud().is_active());
    assert_eq!(api.count("create_service"), 1);
    let out = screen(&mut app, 120, 30);
    assert!(out.contains("Services (3)"));
    assert!(out.contains("Saved service 'ledger'"));
}

#[tokio::test]
async fn test_delete_waits_for_confirmation() {
    let (mut app, api) = app_with(two_services(), ConsoleView::Services, 10).await;

    press(&mut app, KeyCode::Char('d'));
    assert!(app.is_confirming());
    let out = screen(&mut app, 120, 30);
    assert!(out.contains("Delete service 'web' (id 1)?"));

    press(&mut app, KeyCode::Char('n'));
    settle(&mut app).await;
    assert!(!app.is_confirming());
    assert_eq!(api.count("delete_service"), 0);

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('y'));
    settle(&mut app).await;
    assert_eq!(api.count("delete_service"), 1);
    let out = screen(&mut app, 120, 30);
    assert!(out.contains("Services (1)"));
}

#[tokio::test]
async fn test_deleting_last_row_of_last_page_moves_back_a_page() {
    let services = (1..=7)
        .map(|i| service(i, &format!("svc-{:02}", i), Protocol::Rest))
        .collect();
    let (mut app, api) = app_with(
        FakeAdminApi::new().with_services(services),
        ConsoleView::Services,
        6,
    )
    .await;

    press(&mut app, KeyCode::Char('n'));
    let out = screen(&mut app, 120, 30);
    assert!(out.contains("Services (7) page 2/2"));
    assert!(out.contains("svc-07"));

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('y'));
    settle(&mut app).await;
    assert_eq!(api.count("delete_service"), 1);

    let out = screen(&mut app, 120, 30);
    assert!(out.contains("Services (6) page 1/1"));
    assert!(out.contains("svc-01"));
    assert!(!out.contains("svc-07"));
}

#[tokio::test]
async fn test_trace_overlay_shows_timeline() {
    let api = FakeAdminApi::new()
        .with_requests(vec![request(1, "req-1", "/v1/auth", 502)])
        .with_trace(
            "req-1",
            vec![
                TraceEntry {
                    request_id: "req-1".to_string(),
                    component: "gateway".to_string(),
                    message: "request received".to_string(),
                    ..Default::default()
                },
                TraceEntry {
                    request_id: "req-1".to_string(),
                    level: TraceLevel::Error,
                    component: "proxy".to_string(),
                    message: "upstream timeout".to_string(),
                    ..Default::default()
                },
            ],
        );
    let (mut app, _) = app_with(api, ConsoleView::Traffic, 10).await;

    let out = screen(&mut app, 120, 30);
    assert!(out.contains("/v1/auth"));
    assert!(out.contains("502"));

    press(&mut app, KeyCode::Char('t'));
    assert!(app.trace().is_open());
    settle(&mut app).await;
    let out = screen(&mut app, 120, 30);
    assert!(out.contains("Trace req-1"));
    assert!(out.contains("upstream timeout"));

    press(&mut app, KeyCode::Esc);
    assert!(!app.trace().is_open());
}

#[tokio::test]
async fn test_overview_shows_health_and_totals() {
    let api = two_services().with_metrics(metrics_for("billing", 1234));
    let (mut app, _) = app_with(api, ConsoleView::Overview, 10).await;
    app.session().store().refresh_collections(
        app.session().api().as_ref(),
        &[gate9s::store::Collection::Metrics],
    )
    .await;

    let out = screen(&mut app, 120, 40);
    assert!(out.contains("Service Health (1)"));
    assert!(out.contains("1234"));
    assert!(out.contains("CLOSED"));
    assert!(out.contains("Services: 2"));
}

#[tokio::test]
async fn test_view_switching_and_quit() {
    let (mut app, api) = app_with(two_services(), ConsoleView::Overview, 10).await;

    press(&mut app, KeyCode::Char('3'));
    assert_eq!(app.view(), ConsoleView::Routes);
    settle(&mut app).await;
    assert!(api.count("list_routes") >= 2);

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.view(), ConsoleView::ProtoMappings);
    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.view(), ConsoleView::Routes);

    assert!(!press(&mut app, KeyCode::Esc));
    assert_eq!(app.view(), ConsoleView::Overview);
    assert!(press(&mut app, KeyCode::Char('q')));
    app.shutdown();
}
