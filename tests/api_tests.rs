//! API integration tests
//!
//! These run against a live server (and a reachable OpenLibrary) and
//! are ignored by default. Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Create a throwaway account with a unique username and return it
async fn create_test_account(client: &Client) -> String {
    let username = format!(
        "test-user-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    );

    let response = client
        .post(format!("{}/create-account", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "hunter2"
        }))
        .send()
        .await
        .expect("Failed to send create-account request");

    assert!(response.status().is_success());
    username
}

/// Add a well-known single-author book and return its ID
async fn add_test_book(client: &Client, username: &str) -> i64 {
    let response = client
        .post(format!("{}/api/add-book", BASE_URL))
        .json(&json!({
            "username": username,
            "title": "The Hobbit",
            "author": "J.R.R. Tolkien"
        }))
        .send()
        .await
        .expect("Failed to send add-book request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    body["book"]["id"].as_i64().expect("No book id in response")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_account_rejects_duplicate_username() {
    let client = Client::new();
    let username = create_test_account(&client).await;

    let response = client
        .post(format!("{}/create-account", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "other-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
#[ignore]
async fn test_create_account_rejects_missing_password() {
    let client = Client::new();

    let response = client
        .post(format!("{}/create-account", BASE_URL))
        .json(&json!({ "username": "incomplete" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_login_with_fresh_credentials() {
    let client = Client::new();
    let username = create_test_account(&client).await;

    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "hunter2"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().contains(&username));
}

#[tokio::test]
#[ignore]
async fn test_login_with_wrong_password() {
    let client = Client::new();
    let username = create_test_account(&client).await;

    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_update_password_requires_old_password() {
    let client = Client::new();
    let username = create_test_account(&client).await;

    let response = client
        .post(format!("{}/update-password", BASE_URL))
        .json(&json!({
            "username": username,
            "old_password": "wrong",
            "new_password": "new-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);

    // New password must still log in after a real change
    let response = client
        .post(format!("{}/update-password", BASE_URL))
        .json(&json!({
            "username": username,
            "old_password": "hunter2",
            "new_password": "new-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "new-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_added_book_lands_in_want_to_read_bucket() {
    let client = Client::new();
    let username = create_test_account(&client).await;
    let book_id = add_test_book(&client, &username).await;

    let response = client
        .get(format!("{}/api/get-library", BASE_URL))
        .query(&[("username", username.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let want_to_read = body["books"]["Want to Read"].as_array().unwrap();
    assert!(want_to_read.iter().any(|b| b["id"].as_i64() == Some(book_id)));
    assert!(body["books"]["Reading"].as_array().unwrap().is_empty());
    assert!(body["books"]["Read"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_ambiguous_title_returns_candidate_list() {
    let client = Client::new();
    let username = create_test_account(&client).await;

    // Plenty of authors have written a book called "Beowulf"
    let response = client
        .post(format!("{}/api/add-book", BASE_URL))
        .json(&json!({
            "username": username,
            "title": "Beowulf"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 300);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["books"].as_array().unwrap().len() > 1);

    // Nothing was inserted
    let response = client
        .get(format!("{}/api/get-library", BASE_URL))
        .query(&[("username", username.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["books"]["Want to Read"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_update_status_rejects_unknown_value() {
    let client = Client::new();
    let username = create_test_account(&client).await;
    let book_id = add_test_book(&client, &username).await;

    let response = client
        .put(format!("{}/api/update-status/{}", BASE_URL, book_id))
        .json(&json!({
            "username": username,
            "status": "Finished"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    // Stored status is unchanged
    let response = client
        .get(format!("{}/api/get-library", BASE_URL))
        .query(&[("username", username.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["books"]["Want to Read"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_update_status_moves_book_between_buckets() {
    let client = Client::new();
    let username = create_test_account(&client).await;
    let book_id = add_test_book(&client, &username).await;

    let response = client
        .put(format!("{}/api/update-status/{}", BASE_URL, book_id))
        .json(&json!({
            "username": username,
            "status": "Reading"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book"]["status"], "Reading");
}

#[tokio::test]
#[ignore]
async fn test_delete_book_keeps_catalog_entry_for_others() {
    let client = Client::new();
    let first_user = create_test_account(&client).await;
    let book_id = add_test_book(&client, &first_user).await;

    let response = client
        .delete(format!("{}/api/delete-book/{}", BASE_URL, book_id))
        .query(&[("username", first_user.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/api/get-library", BASE_URL))
        .query(&[("username", first_user.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["books"]["Want to Read"].as_array().unwrap().is_empty());

    // A second user can still add the same catalog entry
    let second_user = create_test_account(&client).await;
    let second_id = add_test_book(&client, &second_user).await;
    assert_eq!(second_id, book_id);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_review_is_rejected() {
    let client = Client::new();
    let username = create_test_account(&client).await;
    let book_id = add_test_book(&client, &username).await;

    let response = client
        .post(format!("{}/api/add-review", BASE_URL))
        .json(&json!({
            "username": username,
            "book_id": book_id,
            "review": "Loved it"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/api/add-review", BASE_URL))
        .json(&json!({
            "username": username,
            "book_id": book_id,
            "review": "Loved it twice"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    // Still exactly one review stored
    let response = client
        .get(format!("{}/api/get-reviews", BASE_URL))
        .query(&[("username", username.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["reviews"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_favorite_forces_status_to_read() {
    let client = Client::new();
    let username = create_test_account(&client).await;
    let book_id = add_test_book(&client, &username).await;

    let response = client
        .post(format!("{}/api/add-book-favorite-books", BASE_URL))
        .json(&json!({
            "username": username,
            "book_id": book_id
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book"]["status"], "Read");

    // Favoriting twice is a duplicate
    let response = client
        .post(format!("{}/api/add-book-favorite-books", BASE_URL))
        .json(&json!({
            "username": username,
            "book_id": book_id
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    // The library shows the book in both the Read bucket and favorites
    let response = client
        .get(format!("{}/api/get-library", BASE_URL))
        .query(&[("username", username.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["books"]["Read"].as_array().unwrap().len(), 1);

    // A favorite is only ever visible with status Read; the insert and
    // the status change commit together
    let favorites = body["favorites"].as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["status"], "Read");
}

#[tokio::test]
#[ignore]
async fn test_adding_same_book_twice_returns_existing_view() {
    let client = Client::new();
    let username = create_test_account(&client).await;
    let book_id = add_test_book(&client, &username).await;

    let response = client
        .post(format!("{}/api/add-book", BASE_URL))
        .json(&json!({
            "username": username,
            "title": "The Hobbit",
            "author": "J.R.R. Tolkien"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already in your library with status: 'Want to Read'"));
    assert_eq!(body["book"]["id"].as_i64(), Some(book_id));
    assert_eq!(body["book"]["status"], "Want to Read");

    // Still exactly one library entry
    let response = client
        .get(format!("{}/api/get-library", BASE_URL))
        .query(&[("username", username.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["books"]["Want to Read"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_delete_review_removes_it_and_second_delete_is_not_found() {
    let client = Client::new();
    let username = create_test_account(&client).await;
    let book_id = add_test_book(&client, &username).await;

    let response = client
        .post(format!("{}/api/add-review", BASE_URL))
        .json(&json!({
            "username": username,
            "book_id": book_id,
            "review": "Short but sweet"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/api/delete-review/{}", BASE_URL, book_id))
        .query(&[("username", username.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    // The review is gone, so the user is back to having none
    let response = client
        .get(format!("{}/api/get-reviews", BASE_URL))
        .query(&[("username", username.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    // Deleting again reports the missing review
    let response = client
        .delete(format!("{}/api/delete-review/{}", BASE_URL, book_id))
        .query(&[("username", username.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().contains("No review found"));
}

#[tokio::test]
#[ignore]
async fn test_get_reviews_with_none_is_not_found() {
    let client = Client::new();
    let username = create_test_account(&client).await;

    let response = client
        .get(format!("{}/api/get-reviews", BASE_URL))
        .query(&[("username", username.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_delete_account_cascades() {
    let client = Client::new();
    let username = create_test_account(&client).await;
    add_test_book(&client, &username).await;

    let response = client
        .delete(format!("{}/delete-account", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "hunter2"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/api/get-library", BASE_URL))
        .query(&[("username", username.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
