//! Module to describe a benchmark campaign in a configuration file.
//!
//! Configuration files describe a [`Campaign`](crate::Campaign) in the
//! [`toml`](https://toml.io/en/) format: the sweep resolution, where to
//! write reports and the list of subjects to sweep.
//! ```
//! use iosweep::config::CampaignConfig;
//!
//! let config = CampaignConfig::from_str("
//! resolution = 101
//! output_dir = 'results'
//! timeout_secs = 60
//!
//! [[subject]]
//! name = 'MRU'
//! path = './testpf_MRU'
//! title = 'Strategy: MRU Random Access'
//!
//! [[subject]]
//! name = 'LRU'
//! path = './testpf_LRU'
//! env = { SEED = '1' }
//! ").unwrap();
//!
//! let campaign = config.build().unwrap();
//! assert_eq!(campaign.sweep().points(), 101);
//! assert_eq!(campaign.subjects()[1].title(), "LRU");
//! ```

mod campaign;
pub use campaign::{CampaignConfig, SubjectConfig, DEFAULT_RESOLUTION};
mod error;
pub use error::ConfigError;
