use clap::{crate_version, Arg, ArgMatches, Command};
use iosweep::config::{CampaignConfig, ConfigError, DEFAULT_RESOLUTION};
use iosweep::{Campaign, Subject, Sweep, SweepError};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Invalid command line.
#[derive(Debug)]
pub enum ArgsError {
    InvalidValue { arg: &'static str, value: String },
    InvalidSubject(String),
    DuplicateSubject(String),
    Sweep(SweepError),
    Config(ConfigError),
    MissingCommand,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidValue { arg, value } => {
                write!(f, "Invalid format for arg '{}': '{}'", arg, value)
            }
            ArgsError::InvalidSubject(s) => write!(
                f,
                "Invalid subject '{}': expected <path> or <name>=<path>",
                s
            ),
            ArgsError::DuplicateSubject(name) => write!(
                f,
                "Subject name '{}' is used more than once: name subjects with <name>=<path>",
                name
            ),
            ArgsError::Sweep(e) => write!(f, "{}", e),
            ArgsError::Config(e) => write!(f, "{}", e),
            ArgsError::MissingCommand => write!(f, "No command given"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<SweepError> for ArgsError {
    fn from(e: SweepError) -> Self {
        ArgsError::Sweep(e)
    }
}

impl From<ConfigError> for ArgsError {
    fn from(e: ConfigError) -> Self {
        ArgsError::Config(e)
    }
}

fn parse_value<T: FromStr>(
    matches: &ArgMatches,
    arg: &'static str,
) -> Result<Option<T>, ArgsError> {
    match matches.value_of(arg) {
        None => Ok(None),
        Some(s) => {
            s.parse::<T>()
                .map(Some)
                .map_err(|_| ArgsError::InvalidValue {
                    arg,
                    value: String::from(s),
                })
        }
    }
}

/// Subject names end up as report file names in the output directory.
fn is_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(std::path::is_separator)
        && name != "."
        && name != ".."
}

/// Build a subject from `<path>` or `<name>=<path>`.
///
/// Without a name, the subject is named after the file stem of its path.
/// The report title is `Strategy: <name>`, followed by `suffix` if any.
pub fn parse_subject(
    spec: &str,
    suffix: Option<&str>,
) -> Result<Subject, ArgsError> {
    let subject = match spec.split_once('=') {
        None => Subject::from_path(spec),
        Some((_, "")) => {
            return Err(ArgsError::InvalidSubject(String::from(spec)))
        }
        Some((name, path)) => Subject::new(name, path),
    };
    if !is_file_name(subject.name()) {
        return Err(ArgsError::InvalidSubject(String::from(spec)));
    }

    let title = match suffix {
        None => format!("Strategy: {}", subject.name()),
        Some(s) => format!("Strategy: {} {}", subject.name(), s),
    };
    Ok(subject.with_title(title))
}

pub struct SweepArgs;

impl SweepArgs {
    fn run_command<'a>() -> Command<'a> {
        let subjects = Arg::new("subject")
            .help("Subject program to sweep, as <path> or <name>=<path>. Subjects are swept in the given order.")
            .takes_value(true)
            .multiple_values(true)
            .required(true);
        let resolution = Arg::new("resolution")
            .long("resolution")
            .short('n')
            .takes_value(true)
            .help("Number of read ratios evenly spread over [0, 100]. Defaults to 101.");
        let output_dir = Arg::new("output-dir")
            .long("output-dir")
            .short('o')
            .takes_value(true)
            .default_value(".")
            .help("Directory where the series table and the gnuplot script of each subject are written.");
        let timeout = Arg::new("timeout")
            .long("timeout")
            .short('t')
            .takes_value(true)
            .help("Kill a subject invocation after this many seconds and abort its sweep.");
        let suffix = Arg::new("title-suffix")
            .long("title-suffix")
            .takes_value(true)
            .help("Text appended to the 'Strategy: <name>' report title, e.g. 'Random Access'.");

        Command::new("run")
            .about("Sweep one or more subject programs over read/write mixtures.")
            .arg(subjects)
            .arg(resolution)
            .arg(output_dir)
            .arg(timeout)
            .arg(suffix)
    }

    fn campaign_command<'a>() -> Command<'a> {
        let file = Arg::new("file")
            .help("Toml campaign description.")
            .takes_value(true)
            .required(true);
        Command::new("campaign")
            .about("Run the benchmark campaign described in a configuration file.")
            .arg(file)
    }

    pub fn app<'a>(app_name: &str) -> Command<'a> {
        Command::new(app_name)
            .version(crate_version!())
            .about("Measure the I/O counters of buffer-cache eviction policies under varying read/write mixtures.")
            .subcommand_required(true)
            .subcommand(Self::run_command())
            .subcommand(Self::campaign_command())
    }

    fn campaign_from_run(matches: &ArgMatches) -> Result<Campaign, ArgsError> {
        let resolution = parse_value::<usize>(matches, "resolution")?
            .unwrap_or(DEFAULT_RESOLUTION);
        let timeout = match parse_value::<f64>(matches, "timeout")? {
            None => None,
            Some(s) => match Duration::try_from_secs_f64(s) {
                Ok(t) if !t.is_zero() => Some(t),
                _ => {
                    return Err(ArgsError::InvalidValue {
                        arg: "timeout",
                        value: s.to_string(),
                    })
                }
            },
        };
        let suffix = matches.value_of("title-suffix");

        let mut campaign = Campaign::new(Sweep::new(resolution)?);
        if let Some(dir) = matches.value_of("output-dir") {
            campaign = campaign.with_output_dir(dir);
        }
        let mut names = BTreeSet::new();
        for spec in matches.values_of("subject").into_iter().flatten() {
            let mut subject = parse_subject(spec, suffix)?;
            if !names.insert(String::from(subject.name())) {
                return Err(ArgsError::DuplicateSubject(String::from(
                    subject.name(),
                )));
            }
            if let Some(t) = timeout {
                subject = subject.with_timeout(t);
            }
            campaign = campaign.with_subject(subject);
        }
        Ok(campaign)
    }

    /// Turn parsed command line arguments into a campaign.
    pub fn from_matches(matches: &ArgMatches) -> Result<Campaign, ArgsError> {
        match matches.subcommand() {
            Some(("run", m)) => Self::campaign_from_run(m),
            Some(("campaign", m)) => {
                let file = m.value_of("file").ok_or(ArgsError::MissingCommand)?;
                Ok(CampaignConfig::from_file(file)?.build()?)
            }
            _ => Err(ArgsError::MissingCommand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_subject, ArgsError, SweepArgs};
    use std::time::Duration;

    fn campaign(args: &[&str]) -> Result<iosweep::Campaign, ArgsError> {
        let matches = SweepArgs::app("iosweep")
            .try_get_matches_from(args)
            .unwrap();
        SweepArgs::from_matches(&matches)
    }

    #[test]
    fn test_parse_subject() {
        let s = parse_subject("./testpf_MRU", Some("Random Access")).unwrap();
        assert_eq!(s.name(), "testpf_MRU");
        assert_eq!(s.title(), "Strategy: testpf_MRU Random Access");

        let s = parse_subject("LRU=./bin/testpf_LRU", None).unwrap();
        assert_eq!(s.name(), "LRU");
        assert_eq!(s.path(), std::path::Path::new("./bin/testpf_LRU"));
        assert_eq!(s.title(), "Strategy: LRU");

        assert!(parse_subject("=./x", None).is_err());
        assert!(parse_subject("a/b=./x", None).is_err());
        assert!(parse_subject("LRU=", None).is_err());
        assert!(parse_subject("..=./x", None).is_err());
    }

    #[test]
    fn test_parse_subject_derived_name() {
        for spec in ["/", ".", "..", "./"] {
            assert!(
                matches!(
                    parse_subject(spec, None),
                    Err(ArgsError::InvalidSubject(_))
                ),
                "{} accepted",
                spec
            );
        }
    }

    #[test]
    fn test_run_duplicate_names() {
        match campaign(&["iosweep", "run", "./mru/testpf", "./lru/testpf"]) {
            Err(ArgsError::DuplicateSubject(name)) => assert_eq!(name, "testpf"),
            Err(e) => panic!("Unexpected error {}", e),
            Ok(_) => panic!("Duplicate subject names accepted"),
        }
        let c = campaign(&[
            "iosweep", "run", "MRU=./mru/testpf", "LRU=./lru/testpf",
        ])
        .unwrap();
        assert_eq!(c.subjects().len(), 2);
    }

    #[test]
    fn test_run_defaults() {
        let c = campaign(&["iosweep", "run", "MRU=./m", "LRU=./l"]).unwrap();
        assert_eq!(c.sweep().points(), 101);
        assert_eq!(c.output_dir(), Some(std::path::Path::new(".")));
        let names: Vec<&str> = c.subjects().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["MRU", "LRU"]);
        assert_eq!(c.subjects()[0].timeout(), None);
    }

    #[test]
    fn test_run_options() {
        let c = campaign(&[
            "iosweep", "run", "-n", "5", "-o", "out", "--timeout", "1.5",
            "--title-suffix", "Sequential Access", "./testpf_seq",
        ])
        .unwrap();
        assert_eq!(c.sweep().points(), 5);
        assert_eq!(c.output_dir(), Some(std::path::Path::new("out")));
        assert_eq!(
            c.subjects()[0].title(),
            "Strategy: testpf_seq Sequential Access"
        );
        assert_eq!(
            c.subjects()[0].timeout(),
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn test_run_invalid_values() {
        assert!(matches!(
            campaign(&["iosweep", "run", "-n", "0", "./x"]),
            Err(ArgsError::Sweep(_))
        ));
        assert!(matches!(
            campaign(&["iosweep", "run", "-n", "many", "./x"]),
            Err(ArgsError::InvalidValue { arg: "resolution", .. })
        ));
        assert!(matches!(
            campaign(&["iosweep", "run", "--timeout", "0", "./x"]),
            Err(ArgsError::InvalidValue { arg: "timeout", .. })
        ));
        for t in ["1e30", "inf", "NaN"] {
            assert!(matches!(
                campaign(&["iosweep", "run", "--timeout", t, "./x"]),
                Err(ArgsError::InvalidValue { arg: "timeout", .. })
            ));
        }
    }

    #[test]
    fn test_missing_subject() {
        assert!(SweepArgs::app("iosweep")
            .try_get_matches_from(&["iosweep", "run"])
            .is_err());
        assert!(SweepArgs::app("iosweep")
            .try_get_matches_from(&["iosweep"])
            .is_err());
    }

    #[test]
    fn test_campaign_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "resolution = 11\n[[subject]]\nname = 'MRU'\npath = './m'\n")
            .unwrap();
        let path = file.path().to_string_lossy().into_owned();
        let c = campaign(&["iosweep", "campaign", path.as_str()]).unwrap();
        assert_eq!(c.sweep().points(), 11);
        assert_eq!(c.subjects()[0].name(), "MRU");

        assert!(matches!(
            campaign(&["iosweep", "campaign", "/nonexistent/c.toml"]),
            Err(ArgsError::Config(_))
        ));
    }
}
