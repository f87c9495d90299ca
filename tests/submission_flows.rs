//! Integration tests for the submission flows against a mocked server:
//! create-ingredient (with its no-network duplicate short-circuit), the
//! use-selected-ingredient flow, and delete-then-reload.

use backbar::api::{ApiClient, ApiError};
use backbar::inventory::{
    catalog::CategoryCatalog, prepare_new_ingredient, NewIngredientOutcome,
};
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(Url::parse(&server.uri()).unwrap()).unwrap()
}

fn seeded_catalog() -> CategoryCatalog {
    let mut catalog = CategoryCatalog::new();
    catalog.merge("Gin", "London Dry");
    catalog.merge("Liqueur", "");
    catalog
}

// ============================================================================
// Create Ingredient
// ============================================================================

#[tokio::test]
async fn duplicate_name_issues_no_network_call() {
    let server = MockServer::start().await;
    // The mock proves the point: zero requests may arrive
    Mock::given(method("POST"))
        .and(path("/possible-ingredients"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let master = vec!["Campari".to_string()];

    let outcome = prepare_new_ingredient("CAMPARI", "Liqueur", "", &seeded_catalog(), &master);
    match outcome {
        NewIngredientOutcome::Duplicate { existing } => assert_eq!(existing, "Campari"),
        NewIngredientOutcome::Ready { .. } => {
            // Only a Ready outcome reaches the network; getting here would
            // issue the POST the mock forbids.
            client
                .create_ingredient("CAMPARI", "Liqueur", "")
                .await
                .unwrap();
            panic!("duplicate was not short-circuited");
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    // MockServer verifies expect(0) on drop
}

#[tokio::test]
async fn rejected_validation_issues_no_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/possible-ingredients"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let master: Vec<String> = Vec::new();
    let outcome = prepare_new_ingredient("Pisco", "Brandy", "", &seeded_catalog(), &master);
    assert!(matches!(outcome, NewIngredientOutcome::Rejected { .. }));
}

#[tokio::test]
async fn create_flow_commits_catalog_and_master_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/possible-ingredients"))
        .and(body_string_contains("name=Campari"))
        .and(body_string_contains("category=Liqueur"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut catalog = seeded_catalog();
    let mut master = vec!["Gin".to_string()];

    let outcome = prepare_new_ingredient("Campari", "liqueur", "", &catalog, &master);
    let NewIngredientOutcome::Ready {
        name,
        category,
        sub_category,
    } = outcome
    else {
        panic!("expected ready outcome");
    };
    // Canonical casing was substituted before the POST
    assert_eq!(category, "Liqueur");

    client
        .create_ingredient(&name, &category, &sub_category)
        .await
        .unwrap();

    // Commit local state only after the POST succeeded
    master.push(name.clone());
    catalog.merge(&category, &sub_category);

    assert!(master.iter().any(|n| n == "Campari"));
    assert!(catalog.lookup("liqueur").is_some());
}

#[tokio::test]
async fn create_failure_commits_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/possible-ingredients"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut catalog = seeded_catalog();
    let mut master = vec!["Gin".to_string()];

    let outcome = prepare_new_ingredient("Suze", "Liqueur", "", &catalog, &master);
    let NewIngredientOutcome::Ready {
        name,
        category,
        sub_category,
    } = outcome
    else {
        panic!("expected ready outcome");
    };

    let result = client
        .create_ingredient(&name, &category, &sub_category)
        .await;
    assert!(matches!(result, Err(ApiError::Status(500))));

    // No partial state: the failure path never merges or appends
    if result.is_ok() {
        master.push(name);
        catalog.merge(&category, &sub_category);
    }
    assert!(!master.iter().any(|n| n == "Suze"));
    assert_eq!(catalog.options_for("Liqueur").len(), 0);
    assert_eq!(master.len(), 1);
}

// ============================================================================
// Use Selected Ingredient
// ============================================================================

#[tokio::test]
async fn use_selected_flow_fetches_details_then_posts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ingredient-details/Beefeater"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "category": "Gin",
            "sub_category": "London Dry"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bar"))
        .and(body_string_contains("name=Beefeater"))
        .and(body_string_contains("category=Gin"))
        .and(body_string_contains("sub_category=London+Dry"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let details = client.ingredient_details("Beefeater").await.unwrap();
    client
        .add_to_bar(
            "Beefeater",
            details.category.as_deref().unwrap_or_default(),
            details.sub_category.as_deref().unwrap_or_default(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn error_payload_aborts_before_posting() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ingredient-details/Mystery"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "Ingredient not found"
        })))
        .mount(&server)
        .await;
    // The add POST must never happen when details reported an error
    Mock::given(method("POST"))
        .and(path("/bar"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.ingredient_details("Mystery").await;
    match result {
        Err(ApiError::Server(message)) => assert_eq!(message, "Ingredient not found"),
        other => panic!("expected verbatim server error, got {:?}", other),
    }
}

// ============================================================================
// Delete Item
// ============================================================================

#[tokio::test]
async fn delete_then_reload_reflects_server_state() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/bar/delete_bar_item/Tonic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Tonic deleted from bar"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [],
            "possible_names": ["Tonic"],
            "subcategories": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.delete_item("Tonic").await.unwrap();

    // Recovery is a full reload from server state
    let snapshot = client.fetch_snapshot().await.unwrap();
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.possible_names, vec!["Tonic".to_string()]);
}

#[tokio::test]
async fn delete_failure_changes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/bar/delete_bar_item/Ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "No item named \"Ghost\" found in bar"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.delete_item("Ghost").await;
    assert!(matches!(result, Err(ApiError::Status(404))));
}
