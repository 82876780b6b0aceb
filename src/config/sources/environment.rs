//! Environment variable source: ALGCONF__* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `ALGCONF__XML_PATH`, `ALGCONF__TUNE`, `ALGCONF__LOGGING__LEVEL`, ...
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("ALGCONF")
            .prefix_separator("__")
            .separator("__"),
    );
    Ok(builder)
}
