use {
    reqwest::{Client, ClientBuilder},
    std::time::Duration,
};

const USER_AGENT: &str = "donation-services/1.0.0";

/// An HTTP client factory.
///
/// This ensures a common configuration for all our HTTP clients used in
/// various places, while allowing for separate configurations and connection
/// pools across the different external services.
#[derive(Clone, Debug)]
pub struct ClientFactory {
    timeout: Duration,
}

impl ClientFactory {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Creates a new HTTP client with the default settings.
    pub fn create(&self) -> Client {
        self.builder().build().unwrap()
    }

    /// Creates a client without an overall request timeout. Payment calls
    /// use this: aborting a charge client-side leaves the donor unsure
    /// whether they paid.
    pub fn create_without_timeout(&self) -> Client {
        ClientBuilder::new()
            .user_agent(USER_AGENT)
            .build()
            .unwrap()
    }

    /// Creates a new HTTP client, allowing for additional configuration.
    pub fn configure(&self, config: impl FnOnce(ClientBuilder) -> ClientBuilder) -> Client {
        config(self.builder()).build().unwrap()
    }

    /// Returns a `ClientBuilder` with the default settings.
    pub fn builder(&self) -> ClientBuilder {
        ClientBuilder::new()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
    }
}

impl Default for ClientFactory {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}
