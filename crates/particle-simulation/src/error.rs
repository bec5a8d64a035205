//! Error types for session setup.

use std::fmt;

/// A [`SwarmConfig`](crate::SwarmConfig) value that cannot drive a session.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The population must contain at least one particle.
    NoParticles,
    /// Area dimensions must be positive and fit in screen coordinates.
    InvalidArea { width: u32, height: u32 },
    /// The worker pool needs at least one thread.
    NoWorkers,
    /// Chunking needs a positive divisor and floor.
    InvalidChunking,
    /// The sort interval is taken modulo, so it cannot be zero.
    ZeroSortInterval,
    /// A physics parameter is outside its usable range.
    InvalidPhysics { name: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoParticles => write!(f, "Particle count must be at least 1"),
            ConfigError::InvalidArea { width, height } => {
                write!(f, "Invalid simulation area {}x{}", width, height)
            }
            ConfigError::NoWorkers => write!(f, "Worker count must be at least 1"),
            ConfigError::InvalidChunking => {
                write!(f, "Chunks per worker and minimum chunk size must be at least 1")
            }
            ConfigError::ZeroSortInterval => write!(f, "Sort interval must be at least 1"),
            ConfigError::InvalidPhysics { name, value } => {
                write!(f, "Physics parameter `{}` has unusable value {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur while creating a [`Session`](crate::Session).
#[derive(Debug)]
pub enum SessionError {
    Config(ConfigError),
    /// The worker pool could not be spawned.
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Config(e) => write!(f, "Invalid configuration: {}", e),
            SessionError::ThreadPool(e) => write!(f, "Failed to build worker pool: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Config(e) => Some(e),
            SessionError::ThreadPool(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        SessionError::Config(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for SessionError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        SessionError::ThreadPool(e)
    }
}
