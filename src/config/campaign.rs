use super::ConfigError;
use crate::campaign::Campaign;
use crate::subject::Subject;
use crate::sweep::Sweep;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

/// Sweep resolution of a campaign that does not set one.
pub const DEFAULT_RESOLUTION: usize = 101;

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

/// Configuration format of one subject of a campaign.
///
/// - `name = <string>` identifies the subject and names its report
///   files. It must be unique in a campaign and cannot contain path
///   separators.
/// - `path = <string>` is the subject executable.
/// - `args = [<string>, ...]` is optional and passed to the executable.
/// - `title = <string>` is optional and defaults to `name`.
/// - `timeout_secs = <float>` is optional and overrides the campaign
///   timeout.
/// - `env = { KEY = "value", ... }` is optional extra environment.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SubjectConfig {
    pub name: String,
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<f64>,
    // Serialized as a toml table, so it must come after plain values.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// Configuration format of a campaign.
///
/// - `resolution = <int>` number of read ratios swept over `[0, 100]`,
///   defaults to [`DEFAULT_RESOLUTION`].
/// - `output_dir = <string>` where reports are written. No report is
///   written when absent.
/// - `timeout_secs = <float>` optional per invocation timeout.
/// - `[[subject]]` one table per [`SubjectConfig`], at least one.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CampaignConfig {
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<f64>,
    #[serde(rename = "subject", default)]
    pub subjects: Vec<SubjectConfig>,
}

fn timeout(
    secs: Option<f64>,
    owner: &str,
) -> Result<Option<Duration>, ConfigError> {
    let invalid = |s: f64| {
        ConfigError::ConfigFormatError(format!(
            "{}: timeout_secs must be a positive number of seconds, got {}",
            owner, s
        ))
    };
    match secs {
        None => Ok(None),
        Some(s) if s > 0.0 => Duration::try_from_secs_f64(s)
            .map(Some)
            .map_err(|_| invalid(s)),
        Some(s) => Err(invalid(s)),
    }
}

impl CampaignConfig {
    /// Parse and validate a campaign from a toml string.
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: CampaignConfig =
            toml::from_str(s).map_err(ConfigError::TomlFormatError)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a campaign from a toml file.
    pub fn from_file<P: AsRef<std::path::Path> + std::fmt::Debug>(
        path: P,
    ) -> Result<Self, ConfigError> {
        let mut file = match std::fs::File::open(&path) {
            Ok(f) => f,
            Err(e) => return Err(ConfigError::IOError(e)),
        };
        let mut s = String::from("");

        if let Err(e) = file.read_to_string(&mut s) {
            return Err(ConfigError::IOError(e));
        }
        Self::from_str(s.as_str())
    }

    /// Check the constraints that toml deserialization cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution == 0 {
            return Err(ConfigError::ConfigFormatError(String::from(
                "resolution must be at least 1.",
            )));
        }
        if self.subjects.is_empty() {
            return Err(ConfigError::ConfigFormatError(String::from(
                "Configuration must have at least one [[subject]].",
            )));
        }
        timeout(self.timeout_secs, "campaign")?;

        let mut names = BTreeSet::new();
        for subject in self.subjects.iter() {
            let name = subject.name.as_str();
            if name.is_empty()
                || name.contains(std::path::is_separator)
                || name == "."
                || name == ".."
            {
                return Err(ConfigError::ConfigFormatError(format!(
                    "Invalid subject name '{}': must be a non-empty file name.",
                    name
                )));
            }
            if !names.insert(name) {
                return Err(ConfigError::ConfigFormatError(format!(
                    "Duplicate subject name '{}'.",
                    name
                )));
            }
            if subject.path.as_os_str().is_empty() {
                return Err(ConfigError::ConfigFormatError(format!(
                    "Subject '{}' has an empty path.",
                    name
                )));
            }
            timeout(subject.timeout_secs, name)?;
        }
        Ok(())
    }

    /// Build the campaign described by this configuration.
    pub fn build(&self) -> Result<Campaign, ConfigError> {
        self.validate()?;
        let sweep = Sweep::new(self.resolution)
            .map_err(|e| ConfigError::ConfigFormatError(e.to_string()))?;
        let default_timeout = timeout(self.timeout_secs, "campaign")?;

        let mut campaign = Campaign::new(sweep);
        if let Some(dir) = &self.output_dir {
            campaign = campaign.with_output_dir(dir);
        }
        for s in self.subjects.iter() {
            let mut subject = Subject::new(s.name.as_str(), &s.path)
                .with_args(s.args.iter().map(String::as_str));
            if let Some(title) = &s.title {
                subject = subject.with_title(title.as_str());
            }
            for (k, v) in s.env.iter() {
                subject = subject.with_env(k.as_str(), v.as_str());
            }
            let t = timeout(s.timeout_secs, s.name.as_str())?
                .or(default_timeout);
            if let Some(t) = t {
                subject = subject.with_timeout(t);
            }
            campaign = campaign.with_subject(subject);
        }
        Ok(campaign)
    }

    pub fn to_toml_string_pretty(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ConfigFormatError(e.to_string()))
    }
}
