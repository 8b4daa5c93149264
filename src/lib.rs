pub mod configuration;
pub mod delivery;
pub mod domain;
pub mod startup;
pub mod store;
pub mod subscription;
pub mod telemetry;

mod routes {
    mod api_root;
    mod confirm;
    mod health_check;
    mod home;
    mod response;
    mod subscriptions;

    pub use api_root::*;
    pub use confirm::*;
    pub use health_check::*;
    pub use home::*;
    pub use response::*;
    pub use subscriptions::*;
}
