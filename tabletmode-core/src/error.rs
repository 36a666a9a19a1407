//! Error types for attach/detach detection and switch reporting

use thiserror::Error;

/// Errors from the switch output channel.
#[derive(Error, Debug)]
pub enum OutputError {
    /// The channel refused to register the endpoint (e.g. resource
    /// exhaustion).
    #[error("switch endpoint registration refused: {0}")]
    Registration(String),

    /// Writing a switch report or its sync marker failed.
    #[error("switch report failed: {0}")]
    Report(String),
}

/// Errors from the hotplug event bus.
#[derive(Error, Debug)]
pub enum BusError {
    /// The bus refused the subscription.
    #[error("hotplug subscription refused: {0}")]
    SubscriptionRefused(String),

    /// Opening the underlying event source failed.
    #[error("hotplug monitor setup failed: {0}")]
    Monitor(#[from] std::io::Error),
}

/// Fatal startup errors. `start` retains no resources when returning one.
#[derive(Error, Debug)]
pub enum StartError {
    /// The output channel refused the switch endpoint. No subscription was
    /// attempted.
    #[error("output registration failed: {0}")]
    OutputRegistration(#[from] OutputError),

    /// The hotplug bus refused the subscription. The already-registered
    /// endpoint has been released.
    #[error("hotplug subscription failed: {0}")]
    Subscription(#[from] BusError),
}
