use event_scanner::{build_prompt, EventBatch};

#[test]
fn test_warehouse_rave_prompt() {
    let batch: EventBatch =
        serde_json::from_str(r#"[{"name":"Warehouse Rave","genre":"techno","size":"small"}]"#)
            .unwrap();
    let prompt = build_prompt(&batch);
    insta::assert_debug_snapshot!("warehouse_rave_prompt", prompt.as_str());
}
