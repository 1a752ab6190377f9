//! End-to-end: a real HTTP server on an ephemeral port driven by the SDK.

use std::sync::Arc;

use qflow_api_http::{HttpServer, HttpServerConfig, ServerHandle};
use qflow_core::application::{PatientService, TokenService};
use qflow_core::port::time_provider::SystemTimeProvider;
use qflow_infra_sqlite::{
    create_pool, run_migrations, SqlitePatientRepository, SqliteTokenRepository,
};
use qflow_sdk::{QflowClient, RegisterPatientRequest, SdkError};

async fn start_server() -> (ServerHandle, QflowClient) {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let patients = Arc::new(PatientService::new(Arc::new(SqlitePatientRepository::new(
        pool.clone(),
    ))));
    let tokens = Arc::new(
        TokenService::start(
            Arc::new(SqliteTokenRepository::new(pool)),
            Arc::new(SystemTimeProvider),
        )
        .await
        .unwrap(),
    );

    let config = HttpServerConfig {
        port: 0,
        ..HttpServerConfig::default()
    };
    let handle = HttpServer::new(config, patients, tokens)
        .start()
        .await
        .unwrap();

    let client = QflowClient::new(format!("http://{}", handle.local_addr())).unwrap();
    (handle, client)
}

#[tokio::test]
async fn test_front_desk_flow() {
    let (handle, client) = start_server().await;

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");

    let patient = client
        .register_patient(&RegisterPatientRequest {
            name: "Alice".to_string(),
            address: "1 Main St".to_string(),
            age: 30,
            contact_number: "555-1111".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(client.get_patient(patient.id).await.unwrap(), patient);

    let a = client.issue_token("A").await.unwrap();
    let b = client.issue_token("B").await.unwrap();
    assert_eq!(a.token_number, "T-1");
    assert_eq!(b.token_number, "T-2");
    assert!(!a.is_served);

    let served = client.serve_token(a.id).await.unwrap();
    assert!(served.is_served);
    assert_eq!(client.serve_token(a.id).await.unwrap(), served);

    let waiting = client.list_tokens(Some(false)).await.unwrap();
    assert_eq!(waiting, vec![b]);
    assert_eq!(client.list_tokens(None).await.unwrap().len(), 2);

    let stats = client.queue_stats().await.unwrap();
    assert_eq!(stats.waiting, 1);
    assert_eq!(stats.served, 1);
    assert_eq!(stats.next_token_number, "T-3");

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_not_found_surfaces_as_api_error() {
    let (handle, client) = start_server().await;

    match client.serve_token(77).await {
        Err(SdkError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not found: Token 77 not found");
        }
        other => panic!("expected 404, got {:?}", other),
    }

    let err = client.get_patient(5).await.unwrap_err();
    assert!(err.is_not_found());

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_client_fails_after_stop() {
    let (handle, client) = start_server().await;
    handle.stop().await.unwrap();

    assert!(matches!(
        client.health().await,
        Err(SdkError::Request(_))
    ));
}
