/// Command-line interface and run orchestration
pub mod cli;
/// Algorithm constants and runtime configuration defaults
pub mod configuration;
/// Error types for tiling operations
pub mod error;
/// Progress display for collapse runs
pub mod progress;
/// PNG export of assembled tilings
pub mod render;
