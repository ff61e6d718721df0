//! Contract tests for the HTTP collaborator clients against a mock server.
//!
//! | Service | Method | Path | Test |
//! |---------|--------|------|------|
//! | document store | POST | `/documents` | `upload_*` |
//! | publish | POST | `/content` | `publish_*` |
//! | ledger | POST | `/parcels` | `register_*` |
//! | ledger | GET | `/parcels/{parcelId}` | `status_*` |
//! | ledger | POST | `/parcels/{parcelId}/transfer` | `transfer_*` |
//! | private store | POST | `/references` | `private_reference_*` |

use landreg_client::{
    ClientConfig, CollaboratorError, Collaborators, ContentPublisher, DocumentStore, DocumentUpload, Ledger,
    LedgerRegistration, PrivateReferenceRequest, PrivateReferenceStore, TransferRequest,
};
use landreg_core::ParcelId;
use landreg_tier::{separate, RawRegistrationInput, SeparatedTiers};
use wiremock::matchers::{body_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn collaborators(server: &MockServer) -> Collaborators {
    let config = ClientConfig::single_host(&server.uri(), "test-token").unwrap();
    Collaborators::http(&config).unwrap()
}

fn tiers() -> SeparatedTiers {
    let input = RawRegistrationInput {
        plot_number: "1001".into(),
        district: "Colombo".into(),
        province: "Western".into(),
        owner_name: "Nimal Perera".into(),
        nic: "200112345V".into(),
        owner_wallet_address: "0x1111111111111111111111111111111111111111".into(),
        ..Default::default()
    };
    separate(input).unwrap()
}

// ── POST /documents ─────────────────────────────────────────────────

#[tokio::test]
async fn upload_sends_raw_body_with_type_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("content-type", "application/pdf"))
        .and(header("x-document-type", "deed"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"url": "https://docs.example/deed-1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let c = collaborators(&server);
    let stored = c
        .documents
        .upload(&DocumentUpload::new("deed", "application/pdf", b"%PDF-1.7".to_vec()))
        .await
        .unwrap();
    assert_eq!(stored.url, "https://docs.example/deed-1");
}

#[tokio::test]
async fn upload_maps_server_error_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(503).set_body_string("store offline"))
        .mount(&server)
        .await;

    let err = collaborators(&server)
        .documents
        .upload(&DocumentUpload::new("deed", "application/pdf", b"x".to_vec()))
        .await
        .unwrap_err();
    match err {
        CollaboratorError::Api { endpoint, status, body } => {
            assert_eq!(endpoint, "document_store.upload");
            assert_eq!(status, 503);
            assert_eq!(body, "store offline");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

// ── POST /content ───────────────────────────────────────────────────

#[tokio::test]
async fn publish_returns_content_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "contentId": "bafybeigdyrzt",
            "uri": "ipfs://bafybeigdyrzt"
        })))
        .mount(&server)
        .await;

    let receipt = collaborators(&server)
        .publisher
        .publish(&tiers().public_metadata)
        .await
        .unwrap();
    assert_eq!(receipt.content_id, "bafybeigdyrzt");
    assert_eq!(receipt.uri, "ipfs://bafybeigdyrzt");
}

#[tokio::test]
async fn publish_rejects_malformed_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"cid": 42})))
        .mount(&server)
        .await;

    let err = collaborators(&server)
        .publisher
        .publish(&tiers().public_metadata)
        .await
        .unwrap_err();
    assert!(matches!(err, CollaboratorError::Deserialization { .. }));
}

// ── POST /parcels ───────────────────────────────────────────────────

#[tokio::test]
async fn register_posts_ledger_record() {
    let server = MockServer::start().await;
    let mut t = tiers();
    t.record_publication("bafkcontent");
    let registration = LedgerRegistration::from_tiers(&t);

    Mock::given(method("POST"))
        .and(path("/parcels"))
        .and(body_json(serde_json::json!({
            "parcelId": t.parcel_id().as_str(),
            "district": "Colombo",
            "ownerAddress": "0x1111111111111111111111111111111111111111",
            "publicMetaCid": "bafkcontent",
            "privateDataHash": t.ledger.private_data_hash.clone(),
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "parcelId": t.parcel_id().as_str(),
            "transactionRef": "0xfeed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = collaborators(&server).ledger.register(&registration).await.unwrap();
    assert_eq!(&receipt.parcel_id, t.parcel_id());
    assert_eq!(receipt.transaction_ref, "0xfeed");
}

#[tokio::test]
async fn register_surfaces_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parcels"))
        .respond_with(ResponseTemplate::new(409).set_body_string("already registered"))
        .mount(&server)
        .await;

    let err = collaborators(&server)
        .ledger
        .register(&LedgerRegistration::from_tiers(&tiers()))
        .await
        .unwrap_err();
    assert!(matches!(err, CollaboratorError::Api { status: 409, .. }));
}

// ── GET /parcels/{parcelId} ─────────────────────────────────────────

#[tokio::test]
async fn status_reads_owner_and_keeps_extra_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/parcels/[^/]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "parcelId": "1001|Colombo|GovRef-ABC123",
            "ownerAddress": "0xowner",
            "govVerified": true,
            "registeredAt": 1718000000
        })))
        .mount(&server)
        .await;

    let status = collaborators(&server)
        .ledger
        .status(&ParcelId::new("1001|Colombo|GovRef-ABC123"))
        .await
        .unwrap();
    assert_eq!(status.owner_address, "0xowner");
    assert!(status.gov_verified);
    assert!(!status.public_verified);
    assert_eq!(status.extra["registeredAt"], 1718000000);
}

#[tokio::test]
async fn status_not_found_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/parcels/[^/]+$"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = collaborators(&server)
        .ledger
        .status(&ParcelId::new("404|Nowhere|GovRef-000000"))
        .await
        .unwrap_err();
    assert!(matches!(err, CollaboratorError::Api { status: 404, .. }));
}

// ── POST /parcels/{parcelId}/transfer ───────────────────────────────

#[tokio::test]
async fn transfer_posts_new_owner() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/parcels/[^/]+/transfer$"))
        .and(body_json(serde_json::json!({
            "parcelId": "1001|Colombo|GovRef-ABC123",
            "newOwnerAddress": "0xnew"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"transactionRef": "0xbeef"})))
        .expect(1)
        .mount(&server)
        .await;

    let ack = collaborators(&server)
        .ledger
        .transfer(&TransferRequest {
            parcel_id: ParcelId::new("1001|Colombo|GovRef-ABC123"),
            new_owner_address: "0xnew".into(),
        })
        .await
        .unwrap();
    assert_eq!(ack.transaction_ref, "0xbeef");
}

// ── POST /references ────────────────────────────────────────────────

#[tokio::test]
async fn private_reference_is_admin_only_and_unencrypted() {
    let server = MockServer::start().await;
    let t = tiers();
    let request = PrivateReferenceRequest::admin_only(t.parcel_id().clone(), t.private.clone());
    let expected = serde_json::to_value(&request).unwrap();
    assert_eq!(expected["accessLevel"], "admin-only");
    assert_eq!(expected["encrypted"], false);

    Mock::given(method("POST"))
        .and(path("/references"))
        .and(body_json(expected))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "ref-7"})))
        .expect(1)
        .mount(&server)
        .await;

    let reference = collaborators(&server).private_store.register(&request).await.unwrap();
    assert_eq!(reference.id, "ref-7");
}

#[tokio::test]
async fn unreachable_host_is_http_error() {
    let config = ClientConfig::single_host("http://127.0.0.1:9", "t").unwrap();
    let c = Collaborators::http(&config).unwrap();
    let err = c
        .private_store
        .register(&PrivateReferenceRequest::admin_only(tiers().parcel_id().clone(), tiers().private))
        .await
        .unwrap_err();
    assert!(matches!(err, CollaboratorError::Http { .. }));
}
