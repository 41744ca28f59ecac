use crate::error::{Result, TestInfraError};
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const REDIS_PORT: u16 = 6379;

/// Settings of a disposable Redis container.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisConfig {
    /// Image tag of the official `redis` image.
    #[builder(default = "7.4".to_string())]
    pub tag: String,

    /// How many times to ping the server before giving up.
    #[builder(default = 20)]
    pub ready_attempts: u32,

    /// Pause between two readiness pings.
    #[builder(default = Duration::from_millis(250))]
    pub ready_interval: Duration,
}

/// A single Redis server running in a container.
///
/// The container is removed when this value is dropped.
pub struct RedisServer {
    container: ContainerAsync<GenericImage>,
    url: String,
}

impl RedisServer {
    /// Starts a Redis container with the default settings.
    pub async fn start() -> Result<Self> {
        Self::start_with(RedisConfig::builder().build()).await
    }

    /// Starts a Redis container and waits until it answers `PING`.
    pub async fn start_with(config: RedisConfig) -> Result<Self> {
        let container = GenericImage::new("redis", config.tag.as_str())
            .with_exposed_port(REDIS_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
            .start()
            .await?;

        let host = match container.get_host().await?.to_string().as_str() {
            "localhost" => String::from("127.0.0.1"),
            other => other.to_string(),
        };
        let port = container.get_host_port_ipv4(REDIS_PORT).await?;
        let url = format!("redis://{host}:{port}");

        let server = Self { container, url };
        server.wait_ready(&config).await?;
        Ok(server)
    }

    /// Connection url of the server, e.g. `redis://127.0.0.1:49153`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Opens a new multiplexed connection to the server.
    pub async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        let client = redis::Client::open(self.url.as_str())?;
        Ok(client.get_multiplexed_async_connection().await?)
    }

    /// Returns the underlying container reference.
    pub fn container(&self) -> &ContainerAsync<GenericImage> {
        &self.container
    }

    async fn wait_ready(&self, config: &RedisConfig) -> Result<()> {
        for _ in 0..config.ready_attempts {
            if let Ok(mut conn) = self.connection().await {
                let pong = redis::cmd("PING").query_async::<String>(&mut conn).await;
                if pong.is_ok() {
                    return Ok(());
                }
            }
            tokio::time::sleep(config.ready_interval).await;
        }

        Err(TestInfraError::NotReady {
            service: "redis",
            attempts: config.ready_attempts,
        })
    }
}
