//! Environment overrides for the swarm configuration
//!
//! Every variable is optional. Values that fail to parse are reported and the
//! default is kept.

use std::str::FromStr;

use log::warn;
use particle_renderer::{BlueChannel, PixelWrites};
use particle_simulation::SwarmConfig;

pub fn from_env() -> SwarmConfig {
    apply(SwarmConfig::default(), |key| std::env::var(key).ok())
}

fn apply(mut config: SwarmConfig, lookup: impl Fn(&str) -> Option<String>) -> SwarmConfig {
    if let Some(count) = parsed(&lookup, "SWARM_PARTICLES") {
        config = config.with_particle_count(count);
    }
    if let Some(workers) = parsed(&lookup, "SWARM_WORKERS") {
        config = config.with_workers(workers);
    }
    if let Some(interval) = parsed(&lookup, "SWARM_SORT_INTERVAL") {
        config = config.with_sort_interval(interval);
    }
    if let Some(seed) = parsed(&lookup, "SWARM_SEED") {
        config = config.with_seed(seed);
    }
    if let Some(blue) = keyword(&lookup, "SWARM_BLUE_CHANNEL", blue_channel) {
        config = config.with_blue_channel(blue);
    }
    if let Some(writes) = keyword(&lookup, "SWARM_PIXEL_WRITES", pixel_writes) {
        config = config.with_pixel_writes(writes);
    }
    config
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    keyword(lookup, key, |raw| raw.parse().ok())
}

fn keyword<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = lookup(key)?;
    let value = parse(raw.trim());
    if value.is_none() {
        warn!("Ignoring {}={:?}: not a valid value", key, raw);
    }
    value
}

fn blue_channel(raw: &str) -> Option<BlueChannel> {
    match raw.to_ascii_lowercase().as_str() {
        "literal" => Some(BlueChannel::Literal),
        "masked" => Some(BlueChannel::Masked),
        _ => None,
    }
}

fn pixel_writes(raw: &str) -> Option<PixelWrites> {
    match raw.to_ascii_lowercase().as_str() {
        "racy" => Some(PixelWrites::Racy),
        "atomic" => Some(PixelWrites::Atomic),
        _ => None,
    }
}
