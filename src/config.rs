//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::display::{PickerError, PickerSelection};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "countdown-timer")]
#[command(about = "A countdown timer controlled over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial minutes on the picker
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(0..=60))]
    pub minutes: u32,

    /// Initial seconds on the picker
    #[arg(short, long, default_value = "30", value_parser = clap::value_parser!(u32).range(0..=59))]
    pub seconds: u32,

    /// Milliseconds between progress updates while running
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Start the countdown as soon as the server is up
    #[arg(long)]
    pub autostart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial picker selection
    pub fn selection(&self) -> Result<PickerSelection, PickerError> {
        PickerSelection::new(self.minutes, self.seconds)
    }

    /// Period between progress updates
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
