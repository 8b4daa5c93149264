mod confirmation_token;
mod subscriber_email;

pub use confirmation_token::{ConfirmationToken, TokenGenerationError};
pub use subscriber_email::SubscriberEmail;
