mod common;

use common::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use starhive_client::{BULK_OPERATION_LIMIT, ClientError};
use starhive_model::{BulkItemResult, OperationAction};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Answers every bulk request with one success per operation.
async fn mount_echo(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/object/bulk"))
        .respond_with(|req: &Request| {
            let body: Value = serde_json::from_slice(&req.body).unwrap();
            let result: Vec<Value> = body["operations"]
                .as_array()
                .unwrap()
                .iter()
                .enumerate()
                .map(|(index, op)| {
                    let action = match op["objectOperationType"].as_str().unwrap() {
                        "create" => "CREATE",
                        "patch" => "PATCH",
                        _ => "DELETE",
                    };
                    json!({
                        "status": "success",
                        "operationAction": action,
                        "index": index,
                        "objectId": op.get("objectId").cloned().unwrap_or(json!(format!("new-{index}")))
                    })
                })
                .collect();
            ResponseTemplate::new(200).set_body_json(json!({"failures": false, "result": result}))
        })
        .mount(server)
        .await;
}

#[tokio::test]
async fn bulk_classifies_by_identity() {
    let server = MockServer::start().await;
    mount_echo(&server).await;

    let mut existing = named("Old");
    existing.id = Some("o-1".into());
    let objects = vec![named("New"), existing];

    let response = client(&server)
        .create_or_update_objects_in_bulk(&objects)
        .await
        .unwrap();
    assert!(!response.failures);
    assert_eq!(response.result.len(), 2);
    assert_eq!(response.result[0].operation_action(), OperationAction::Create);
    assert_eq!(response.result[1].operation_action(), OperationAction::Patch);
    assert_eq!(response.object_ids(), vec![Some("new-0"), Some("o-1")]);

    let bodies = request_bodies(&server).await;
    assert_eq!(
        bodies[0],
        json!({"operations": [
            {"objectOperationType": "create", "typeId": "shoes",
             "attributes": [{"attributeId": "name", "values": ["New"]}], "transitions": {}},
            {"objectOperationType": "patch", "objectId": "o-1",
             "attributes": [{"attributeId": "name", "values": ["Old"]}], "transitions": {}}
        ]})
    );
}

#[tokio::test]
async fn mixed_failures_are_data_not_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/object/bulk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "failures": true,
            "result": [
                {"status": "success", "operationAction": "DELETE", "index": 0, "objectId": "a"},
                {"status": "failure", "operationAction": "DELETE", "index": 1,
                 "violations": [{"fieldIdentifier": "id", "violationType": "NOT_FOUND", "invalidValue": "b"}]},
                {"status": "success", "operationAction": "DELETE", "index": 2, "objectId": "c"}
            ]
        })))
        .mount(&server)
        .await;

    let response = client(&server)
        .delete_objects_in_bulk(&["a", "b", "c"])
        .await
        .unwrap();
    assert!(response.failures);
    assert_eq!(response.result.len(), 3);
    for (position, item) in response.result.iter().enumerate() {
        assert_eq!(item.index(), position);
    }
    let failed: Vec<&BulkItemResult> = response.failed_items().collect();
    assert_eq!(failed.len(), 1);
    let BulkItemResult::Failure { violations, .. } = failed[0] else {
        panic!("expected failure");
    };
    assert_eq!(violations[0].invalid_value.as_deref(), Some("b"));

    let bodies = request_bodies(&server).await;
    assert_eq!(
        bodies[0],
        json!({"operations": [
            {"objectOperationType": "delete", "objectId": "a"},
            {"objectOperationType": "delete", "objectId": "b"},
            {"objectOperationType": "delete", "objectId": "c"}
        ]})
    );
}

#[tokio::test]
async fn single_request_does_not_split_large_batches() {
    let server = MockServer::start().await;
    mount_echo(&server).await;

    let ids: Vec<String> = (0..100).map(|i| format!("id-{i}")).collect();
    let response = client(&server).delete_objects_in_bulk(&ids).await.unwrap();
    assert_eq!(response.result.len(), 100);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn batches_split_at_limit_and_rebase_indices() {
    let server = MockServer::start().await;
    mount_echo(&server).await;

    let objects: Vec<Shoes> = (0..170).map(|i| named(&format!("Shoe {i}"))).collect();
    let response = client(&server)
        .create_or_update_objects_in_batches(&objects)
        .await
        .unwrap();

    assert_eq!(response.result.len(), 170);
    for (position, item) in response.result.iter().enumerate() {
        assert_eq!(item.index(), position);
    }

    let sizes: Vec<usize> = request_bodies(&server)
        .await
        .iter()
        .map(|b| b["operations"].as_array().unwrap().len())
        .collect();
    assert_eq!(sizes, vec![BULK_OPERATION_LIMIT, BULK_OPERATION_LIMIT, 10]);
}

#[tokio::test]
async fn batched_delete_merges_failure_flag() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/object/bulk"))
        .respond_with(|req: &Request| {
            let body: Value = serde_json::from_slice(&req.body).unwrap();
            let ops = body["operations"].as_array().unwrap();
            // the short trailing chunk reports its first item as failed
            let fail_first = ops.len() < BULK_OPERATION_LIMIT;
            let result: Vec<Value> = ops
                .iter()
                .enumerate()
                .map(|(index, op)| {
                    if fail_first && index == 0 {
                        json!({"status": "failure", "operationAction": "DELETE", "index": index, "violations": []})
                    } else {
                        json!({"status": "success", "operationAction": "DELETE", "index": index, "objectId": op["objectId"]})
                    }
                })
                .collect();
            ResponseTemplate::new(200).set_body_json(json!({"failures": fail_first, "result": result}))
        })
        .mount(&server)
        .await;

    let ids: Vec<String> = (0..85).map(|i| format!("id-{i}")).collect();
    let response = client(&server).delete_objects_in_batches(&ids).await.unwrap();
    assert!(response.failures);
    assert_eq!(response.result.len(), 85);
    let failed: Vec<usize> = response.failed_items().map(BulkItemResult::index).collect();
    assert_eq!(failed, vec![80]);
}

#[tokio::test]
async fn short_bulk_response_is_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/object/bulk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "failures": false,
            "result": [{"status": "success", "operationAction": "DELETE", "index": 0, "objectId": "a"}]
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .delete_objects_in_bulk(&["a", "b"])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Protocol(_)));
}

#[tokio::test]
async fn transport_failure_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/object/bulk"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server)
        .delete_objects_in_bulk(&["a"])
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(503));
}
