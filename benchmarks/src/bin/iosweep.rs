use iosweep_benchmarks::SweepArgs;
use std::process::exit;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let matches = SweepArgs::app("iosweep").get_matches();
    let campaign = match SweepArgs::from_matches(&matches) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            exit(2);
        }
    };

    match campaign.run() {
        Ok(results) => {
            for r in results.iter() {
                match &r.files {
                    Some(files) => println!(
                        "{}: saved {} and {}",
                        r.subject.name(),
                        files.data.display(),
                        files.script.display(),
                    ),
                    None => println!(
                        "{}: {} read/write mixtures swept",
                        r.subject.name(),
                        r.series.len()
                    ),
                }
            }
            println!("Done.");
        }
        Err(e) => {
            log::error!("{}", e);
            exit(1);
        }
    }
}
