//! Command line front-end of `iosweep`.

mod args;
pub use args::{parse_subject, ArgsError, SweepArgs};
