use cmdb_core::{InventoryClient, ResourceCategory, TableView};
use cmdb_ui::resource_table_ui;
use cmdb_ui::state_manager::ResourceStateManager;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Drain completions the way the frame loop does until the fetch settles.
async fn settle(state: &mut ResourceStateManager) {
    for _ in 0..100 {
        state.update_from_async();
        if !state.is_loading() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("fetch did not settle");
}

#[tokio::test]
async fn test_latest_category_wins_through_frame_loop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vms"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"name": "vm-01"}]))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/sqlservers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "srv1", "id": "s1", "location": "eastus", "version": "15.0", "status": "Running"}
        ])))
        .mount(&server)
        .await;

    let mut state = ResourceStateManager::new(Some(InventoryClient::new(&server.uri())));
    assert!(state.select_category(ResourceCategory::Vm));
    assert!(state.select_category(ResourceCategory::SqlServer));
    settle(&mut state).await;

    // Let the slow VM response land, then make sure it is discarded.
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(state.update_from_async(), 0);

    let TableView::Table(table) = state.view() else {
        panic!("expected a table, got {:?}", state.view());
    };
    assert_eq!(table.category, ResourceCategory::SqlServer);
    assert_eq!(
        table.rows[0].cells,
        vec!["srv1", "s1", "eastus", "15.0", "Running", "not specified"]
    );
}

#[tokio::test]
async fn test_set_client_reloads_current_category() {
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sqldatabases"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&broken)
        .await;

    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sqldatabases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&healthy)
        .await;

    let mut state = ResourceStateManager::new(Some(InventoryClient::new(&broken.uri())));
    state.select_category(ResourceCategory::SqlDatabase);
    settle(&mut state).await;
    assert!(matches!(state.view(), TableView::Error(m) if m.contains("503")));

    state.set_client(InventoryClient::new(&healthy.uri()));
    assert!(state.is_loading());
    settle(&mut state).await;

    assert_eq!(state.view(), &TableView::Empty);
    assert_eq!(
        state.endpoint_url(),
        Some(format!("{}/api/sqldatabases", healthy.uri()))
    );
}

#[tokio::test]
async fn test_table_and_details_panel_draw_selected_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "vm-01", "vm_id": "a", "tags": {"env": "prod"}},
            {"name": "vm-02", "vm_id": "b"}
        ])))
        .mount(&server)
        .await;

    let mut state = ResourceStateManager::new(Some(InventoryClient::new(&server.uri())));
    state.select_category(ResourceCategory::Vm);
    settle(&mut state).await;
    state.select_row(0, "a");

    let ctx = egui::Context::default();
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        egui::SidePanel::right("record_details").show(ctx, |ui| {
            resource_table_ui::show_record_details(ui, &mut state);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            resource_table_ui::show_resource_table(ui, &mut state);
        });
    });

    // Drawing alone changes nothing.
    let record = state.selected_record().unwrap();
    assert_eq!(record.name().as_deref(), Some("vm-01"));
    assert_eq!(record.tags(), vec![("env".to_string(), "prod".to_string())]);
    assert_eq!(state.selection().map(|s| s.key.as_str()), Some("a"));

    state.clear_selection();
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            resource_table_ui::show_record_details(ui, &mut state);
        });
    });
    assert!(state.selected_record().is_none());
}
