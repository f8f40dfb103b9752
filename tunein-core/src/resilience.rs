//! Timeouts and pacing for calls to external services

pub mod timeout {
    //! Timeout configuration for external service calls

    use std::time::Duration;

    /// Default timeout for Redis operations
    pub const REDIS_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

    /// Default timeout for calls to the streaming provider's room service
    pub const PROVIDER_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

    /// Default timeout for one push notification delivery
    pub const NOTIFICATION_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connect timeout shared by all outbound HTTP clients
    pub const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
}

pub mod pacing {
    //! Fixed-interval pacing for sequential fan-out loops

    use std::time::Duration;

    /// Default pause after each notification delivery, in milliseconds
    pub const DEFAULT_SEND_INTERVAL_MILLIS: u64 = 100;

    /// Bounds the rate of a sequential loop: one unit of work, then a fixed pause.
    ///
    /// The pause follows every unit, including the last one, so a loop of `n`
    /// units takes at least `n * interval`.
    #[derive(Debug, Clone, Copy)]
    pub struct Pacer {
        interval: Duration,
    }

    impl Pacer {
        #[must_use]
        pub const fn new(interval: Duration) -> Self {
            Self { interval }
        }

        /// Wait out the interval after a unit of work
        pub async fn pause(&self) {
            if !self.interval.is_zero() {
                tokio::time::sleep(self.interval).await;
            }
        }
    }

}
