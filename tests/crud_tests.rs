//! Create, edit and delete flows against an in-memory gateway

mod common;

use common::{FakeAdminApi, route, service};
use gate9s::api::AdminApi;
use gate9s::crud::{
    AutoConfirm, CrudController, CrudError, DeleteOutcome, DeleteTarget, FormField, ModalState,
    delete_with_confirmation, eligible_services,
};
use gate9s::models::{Protocol, ResourceDraft, ResourceKind, ServiceDraft};
use gate9s::store::{ConsoleView, ResourceStore};
use std::sync::Arc;

fn fake(api: FakeAdminApi) -> (Arc<FakeAdminApi>, Arc<dyn AdminApi>) {
    let api = Arc::new(api);
    let dyn_api: Arc<dyn AdminApi> = api.clone();
    (api, dyn_api)
}

#[tokio::test]
async fn test_grpc_service_without_address_is_rejected_before_any_call() {
    let (api, dyn_api) = fake(FakeAdminApi::new());
    let mut crud = CrudController::new();
    crud.open_create(ResourceKind::Service).unwrap();
    *crud.draft_mut().unwrap() = ResourceDraft::Service(ServiceDraft {
        name: "billing".to_string(),
        protocol: Protocol::Grpc,
        ..Default::default()
    });

    let err = crud
        .submit(&dyn_api, &ResourceStore::new(), ConsoleView::Services)
        .await
        .unwrap_err();

    assert!(matches!(err, CrudError::Validation(_)));
    assert!(api.calls().is_empty());
    assert!(matches!(crud.state(), ModalState::Open(_)));
}

#[tokio::test]
async fn test_new_route_is_created_then_store_refreshed() {
    let (api, dyn_api) = fake(FakeAdminApi::new().with_services(vec![service(
        10,
        "auth",
        Protocol::Rest,
    )]));
    let store = ResourceStore::new();
    let mut crud = CrudController::new();
    crud.open_create(ResourceKind::Route).unwrap();
    {
        let draft = crud.draft_mut().unwrap();
        draft.set_field(FormField::Path, "/v1/auth");
        draft.set_field(FormField::EndpointFilter, "/auth");
        draft.cycle(FormField::Service, &[service(10, "auth", Protocol::Rest)], true);
    }

    let (record, refresh) = crud
        .submit(&dyn_api, &store, ConsoleView::Routes)
        .await
        .unwrap();
    assert!(refresh.await.unwrap().is_ok());

    assert_eq!(record.kind(), ResourceKind::Route);
    assert_eq!(api.count("create_route"), 1);
    assert_eq!(api.count("update_route"), 0);
    assert_eq!(store.routes().len(), 1);
    assert_eq!(store.routes()[0].service_id, 10);
    assert_eq!(crud.state(), &ModalState::Closed);
}

#[tokio::test]
async fn test_existing_route_is_updated_by_id() {
    let existing = route(7, "/v1/auth", "GET", 10);
    let (api, dyn_api) = fake(FakeAdminApi::new().with_routes(vec![existing.clone()]));
    let mut crud = CrudController::new();
    crud.open_edit(&existing).unwrap();
    crud.draft_mut()
        .unwrap()
        .set_field(FormField::Tag, "public");

    let (record, refresh) = crud
        .submit(&dyn_api, &ResourceStore::new(), ConsoleView::Routes)
        .await
        .unwrap();
    refresh.await.unwrap();

    assert_eq!(record.id(), 7);
    assert_eq!(api.count("update_route"), 1);
    assert_eq!(api.count("create_route"), 0);
    assert!(api.calls().contains(&"update_route:7".to_string()));
}

#[tokio::test]
async fn test_backend_failure_reopens_form_with_values() {
    let (api, dyn_api) = fake(FakeAdminApi::new());
    api.fail("create_service");
    let mut crud = CrudController::new();
    crud.open_create(ResourceKind::Service).unwrap();
    {
        let draft = crud.draft_mut().unwrap();
        draft.set_field(FormField::Name, "web");
        draft.set_field(FormField::BaseUrl, "http://web:8080");
    }

    let err = crud
        .submit(&dyn_api, &ResourceStore::new(), ConsoleView::Services)
        .await
        .unwrap_err();
    assert!(matches!(err, CrudError::Api(_)));

    let session = crud.session().unwrap();
    assert!(matches!(crud.state(), ModalState::Open(_)));
    assert_eq!(
        session.error.as_deref(),
        Some("500 create_service unavailable")
    );
    assert_eq!(session.draft.value(FormField::Name, &[]), "web");
    // no refresh after a failed save
    assert_eq!(api.count("list_services"), 0);
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let web = service(3, "web", Protocol::Rest);
    let api = FakeAdminApi::new().with_services(vec![web.clone()]);
    let store = ResourceStore::new();

    let outcome = delete_with_confirmation(
        &api,
        &store,
        ConsoleView::Services,
        &DeleteTarget::from(&web),
        &AutoConfirm(false),
    )
    .await;

    assert_eq!(outcome, DeleteOutcome::Declined);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_confirmed_delete_refreshes_view() {
    let web = service(3, "web", Protocol::Rest);
    let api = FakeAdminApi::new().with_services(vec![web.clone(), service(4, "api", Protocol::Rest)]);
    let store = ResourceStore::new();
    store.refresh(&api, ConsoleView::Services).await;

    let outcome = delete_with_confirmation(
        &api,
        &store,
        ConsoleView::Services,
        &DeleteTarget::from(&web),
        &AutoConfirm(true),
    )
    .await;

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(api.count("delete_service"), 1);
    assert_eq!(api.count("list_services"), 2);
    let names: Vec<_> = store.services().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["api"]);
}

#[tokio::test]
async fn test_failed_delete_is_not_followed_by_refresh() {
    let web = service(3, "web", Protocol::Rest);
    let api = FakeAdminApi::new().with_services(vec![web.clone()]);
    api.fail("delete_service");

    let outcome = delete_with_confirmation(
        &api,
        &ResourceStore::new(),
        ConsoleView::Services,
        &DeleteTarget::from(&web),
        &AutoConfirm(true),
    )
    .await;

    assert!(matches!(outcome, DeleteOutcome::Failed(_)));
    assert_eq!(api.count("list_services"), 0);
}

#[test]
fn test_proto_mapping_offers_only_grpc_services() {
    let services = vec![
        service(1, "web", Protocol::Rest),
        service(2, "billing", Protocol::Grpc),
    ];
    let names: Vec<_> = eligible_services(ResourceKind::ProtoMapping, &services)
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["billing"]);
    assert_eq!(eligible_services(ResourceKind::Route, &services).len(), 2);
}
