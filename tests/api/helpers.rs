use actix_web::rt::spawn;
use newsletter_signup::configuration::get_configuration;
use newsletter_signup::delivery::{DeliveryError, TokenDelivery};
use newsletter_signup::domain::{ConfirmationToken, SubscriberEmail};
use newsletter_signup::startup::Application;
use newsletter_signup::store::InMemoryStore;
use newsletter_signup::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

/// Token delivery hook that records every issued token so tests can drive
/// the confirmation flow without an email channel.
#[derive(Default)]
pub struct RecordingDelivery {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingDelivery {
    /// Tokens issued so far, in order of issuance.
    pub fn tokens(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, token)| token.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl TokenDelivery for RecordingDelivery {
    async fn deliver(
        &self,
        recipient: &SubscriberEmail,
        token: &ConfirmationToken,
    ) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.as_ref().to_string(), token.as_ref().to_string()));
        Ok(())
    }
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub delivery: Arc<RecordingDelivery>,
}

impl TestApp {
    pub async fn post_create(&self, body: serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/api/create", &self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Raw-body variant for payloads that are not valid JSON.
    pub async fn post_create_raw(&self, body: String) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/api/create", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_confirm(&self, token: &str) -> reqwest::Response {
        reqwest::get(&format!(
            "{}/api/confirm?token={}",
            &self.address, token
        ))
        .await
        .expect("Failed to execute request.")
    }
}

/// Helper function that sets up a server and binds it to an address that is
/// returned. This way, individual tests know where to send their requests.
///
/// The app runs on an in-memory pending-confirmation store and a recording
/// delivery hook; both handles are kept on [TestApp] so tests can inspect
/// stored keys and pick up issued tokens.
pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration");
        // Use a random OS port.
        c.application.port = 0;
        c
    };

    let store = Arc::new(InMemoryStore::default());
    let delivery = Arc::new(RecordingDelivery::default());

    let application =
        Application::build_with_store(configuration, store.clone(), delivery.clone())
            .expect("Failed to build application");

    let port = application.port();
    let address = format!("http://127.0.0.1:{port}");

    let _ = spawn(application.run_until_stopped());

    TestApp {
        address,
        store,
        delivery,
    }
}
