use tracing::info;

use madang_core::{Engine, Result, Sink, redact_connection_string};

use crate::options::SinkConfig;
use crate::sql::{MySqlSink, PostgresSink};

/// Open a sink for the engine named by the URL scheme.
pub async fn connect(config: &SinkConfig) -> Result<Box<dyn Sink>> {
    let engine = Engine::detect(&config.url)?;
    info!(
        event = "engine_detected",
        engine = %engine,
        connection = %redact_connection_string(&config.url).redacted
    );

    match engine {
        Engine::MySql => Ok(Box::new(MySqlSink::connect(config).await?)),
        Engine::Postgres => Ok(Box::new(PostgresSink::connect(config).await?)),
    }
}
