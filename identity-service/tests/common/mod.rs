use std::sync::Arc;

use auth::JwtOptions;
use auth::TokenIssuer;
use identity_service::domain::account::service::AccountService;
use identity_service::domain::profile::service::ProfileService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::mapping::DirectAddressMapper;
use identity_service::outbound::repositories::InMemoryIdentityStore;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_PASSWORD: &str = "Pa$$w0rd";

/// Test application that spawns a real server over an in-memory identity store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryIdentityStore>,
    pub token_issuer: Arc<TokenIssuer>,
    pub api_client: reqwest::Client,
}

pub fn jwt_options() -> JwtOptions {
    JwtOptions {
        secret_key: TEST_SECRET.to_string(),
        issuer: "https://identity.test".to_string(),
        audience: "storefront".to_string(),
        duration_in_days: 7,
    }
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryIdentityStore::new());
        let token_issuer =
            Arc::new(TokenIssuer::new(&jwt_options()).expect("Failed to create token issuer"));

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&store),
            Arc::clone(&token_issuer),
        ));
        let profile_service = Arc::new(ProfileService::new(
            Arc::clone(&store),
            Arc::new(DirectAddressMapper),
        ));

        let router = create_router(account_service, profile_service, Arc::clone(&token_issuer));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            token_issuer,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user with a policy-compliant password and return the response body
    pub async fn register(&self, username: &str, email: &str) -> Value {
        let response = self
            .post("/api/authentication/register")
            .json(&json!({
                "username": username,
                "email": email,
                "display_name": format!("{} display", username),
                "password": TEST_PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Register a user and return its bearer token
    pub async fn register_and_get_token(&self, username: &str, email: &str) -> String {
        let body = self.register(username, email).await;
        body["data"]["token"]
            .as_str()
            .expect("token missing from response")
            .to_string()
    }
}
