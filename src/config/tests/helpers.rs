//! Layer builders for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::DeltaConfig;

/// One configuration source, lowest precedence first.
#[derive(Debug, Clone)]
pub enum Layer {
    Defaults(Value),
    File(Value),
    Environment(Value),
    Cli(Value),
}

/// Merges `layers` over the built-in defaults, as a real load does.
pub fn merge_layers<I>(layers: I) -> DeltaConfig
where
    I: IntoIterator<Item = Layer>,
{
    let mut composer = MergeComposer::new();
    composer.push_defaults(
        serde_json::to_value(DeltaConfig::default()).expect("defaults should serialise"),
    );

    for layer in layers {
        match layer {
            Layer::Defaults(value) => composer.push_defaults(value),
            Layer::File(value) => composer.push_file(value, None),
            Layer::Environment(value) => composer.push_environment(value),
            Layer::Cli(value) => composer.push_cli(value),
        }
    }

    DeltaConfig::merge_from_layers(composer.layers()).expect("layers should merge")
}
