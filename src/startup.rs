//! Module that includes helper functions to start the newsletter signup
//! application.

use crate::configuration::{CacheBackend, CacheSettings, Settings};
use crate::delivery::{LogDelivery, TokenDelivery};
use crate::routes;
use crate::store::{ConfirmationStore, InMemoryStore, RedisStore};
use crate::subscription::SubscriptionWorkflow;
use actix_web::{dev::Server, web, App, HttpServer};
use secrecy::ExposeSecret;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

// A type to hold the newly built server and its port.
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Build the application from its configuration, wiring the cache
    /// backend the configuration selects and the default (log-only) token
    /// delivery hook.
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let store = build_store(&configuration.cache).await?;
        let application = Self::build_with_store(configuration, store, Arc::new(LogDelivery))?;

        Ok(application)
    }

    /// Build the application around an already constructed store and
    /// delivery hook. Tests use this seam to inject an in-memory store and
    /// a recording delivery implementation.
    pub fn build_with_store(
        configuration: Settings,
        store: Arc<dyn ConfirmationStore>,
        delivery: Arc<dyn TokenDelivery>,
    ) -> Result<Self, std::io::Error> {
        // Address for the service that will run the newsletter application.
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );

        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            store,
            delivery,
            configuration.cache.confirmation_ttl(),
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Construct the pending-confirmation store the configuration asks for.
///
/// The Redis backend is verified with a `PING` before the application
/// starts taking requests, as a misconfigured cache address should fail the
/// boot rather than the first subscription.
pub async fn build_store(
    settings: &CacheSettings,
) -> Result<Arc<dyn ConfirmationStore>, anyhow::Error> {
    match settings.backend {
        CacheBackend::Memory => Ok(Arc::new(InMemoryStore::default())),
        CacheBackend::Redis => {
            let store =
                RedisStore::connect(settings.uri.expose_secret(), settings.command_timeout())
                    .await?;
            Ok(Arc::new(store))
        }
    }
}

/// Create a new HttpServer instance.
///
/// # Description
///
/// This function takes the following arguments:
/// - A [TcpListener] bound to the address and port the service listens on.
/// - The pending-confirmation store and the token delivery hook.
/// - The TTL applied to every pending confirmation.
///
/// The subscription workflow is built once and handed to every handler as
/// explicit `web::Data` state; nothing is reached through ambient globals.
pub fn run(
    listener: TcpListener,
    store: Arc<dyn ConfirmationStore>,
    delivery: Arc<dyn TokenDelivery>,
    confirmation_ttl: Duration,
) -> Result<Server, std::io::Error> {
    let workflow = web::Data::new(SubscriptionWorkflow::new(store, delivery, confirmation_ttl));

    // Connect all the services that are featured by the app.
    let server = HttpServer::new(move || {
        App::new()
            // Add the Logger middleware.
            .wrap(TracingLogger::default())
            // JSON API.
            .service(routes::api_root)
            .service(routes::health_check)
            .service(routes::create_subscription)
            .service(routes::confirm)
            // Landing page and embedded assets.
            .service(routes::home)
            .service(routes::static_asset)
            // State of the app: the subscription workflow.
            .app_data(workflow.clone())
    })
    // Attach the listener to the app.
    .listen(listener)?
    // And run the server.
    .run();

    Ok(server)
}
