use anyhow::Result;
use clap::{App, Arg};
use pagemill::batch::Generator;
use pagemill::config::Config;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = App::new("pagemill")
        .about("Generates batches of templated HTML pages into rotating output folders")
        .arg(
            Arg::with_name("directory")
                .short("d")
                .long("directory")
                .takes_value(true)
                .help("Project directory holding pagemill.yaml, the template, and keyword files"),
        )
        .arg(
            Arg::with_name("count")
                .short("c")
                .long("count")
                .takes_value(true)
                .help("Number of pages to generate in this batch"),
        )
        .arg(
            Arg::with_name("template")
                .short("t")
                .long("template")
                .takes_value(true)
                .help("Template file overriding the configured one, relative to the project directory"),
        )
        .get_matches();

    let dir = Path::new(matches.value_of("directory").unwrap_or("."));
    let mut config = Config::load(dir)?;
    if let Some(template) = matches.value_of("template") {
        config.override_template(dir, Path::new(template));
    }
    let count = match matches.value_of("count") {
        Some(count) => count.parse()?,
        None => config.batch_size,
    };

    let generator = Generator::new(config)?;
    generator.run_batch(&mut rand::thread_rng(), count)?;
    Ok(())
}
