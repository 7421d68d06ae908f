//! Configuration system for tabstat.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod distribution_config;
pub mod io_config;
pub mod outlier_config;
pub mod tabstat_config;

pub use distribution_config::DistributionConfig;
pub use io_config::{parse_delimiter, IoConfig};
pub use outlier_config::OutlierConfig;
pub use tabstat_config::{CliOverrides, TabstatConfig};
