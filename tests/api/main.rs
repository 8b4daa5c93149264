mod health_check;
mod helpers;
mod subscriptions_confirm;
