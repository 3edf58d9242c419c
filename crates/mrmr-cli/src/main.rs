use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgAction, Command, ValueHint};
use log::LevelFilter;

use mrmr_core::config::{Discretization, RankingConfig};
use mrmr_core::dataset::Dataset;
use mrmr_core::feature_selection::{write_ranking, MrmrSelector};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("MRMR_LOG", "warn"))
        .init();

    let matches = Command::new("mrmr")
        .version(clap::crate_version!())
        .about(
            "Compute mRMR values for attributes in a data set, taking input \
             from standard input or from a file",
        )
        .arg(
            Arg::new("delimiter")
                .short('t')
                .long("delimiter")
                .value_name("CHAR")
                .help("Use CHAR as the field separator; defaults to TAB")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("class")
                .short('c')
                .long("class")
                .value_name("NUM")
                .help("1-indexed class attribute selection; defaults to 1")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("1"),
        )
        .arg(
            Arg::new("discretize")
                .short('d')
                .long("discretize")
                .value_name("VALUE")
                .help("One of {round,floor,ceiling,truncate}; defaults to truncate")
                .value_parser(["round", "floor", "ceiling", "truncate"]),
        )
        .arg(
            Arg::new("write_data")
                .short('w')
                .long("write-data")
                .help("Read, transform, and write the data set to stdout instead of ranking")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("file")
                .help("Input file; reads standard input when omitted")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .get_matches();

    let delimiter = match matches.get_one::<String>("delimiter") {
        None => '\t',
        Some(value) if value == "\\t" => '\t',
        Some(value) => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(anyhow!("-t, --delimiter=CHAR must be a single character")),
            }
        }
    };

    let class_attribute = *matches.get_one::<u64>("class").unwrap() as usize - 1;

    let discretization = match matches.get_one::<String>("discretize") {
        Some(value) => value
            .parse::<Discretization>()
            .map_err(|message| anyhow!(message))?,
        None => {
            log::warn!("No discretization method chosen. Default 'truncate' used");
            Discretization::default()
        }
    };

    let config = RankingConfig {
        delimiter,
        class_attribute,
        discretization,
    };

    let reader: Box<dyn BufRead> = match matches.get_one::<PathBuf>("file") {
        Some(path) => {
            log::info!("reading from file {}", path.display());
            Box::new(BufReader::new(File::open(path).with_context(|| {
                format!("Failed to open input file: {}", path.display())
            })?))
        }
        None => {
            log::info!("reading from standard input");
            Box::new(BufReader::new(io::stdin()))
        }
    };

    let started = Instant::now();
    let dataset = Dataset::<u8>::from_reader(reader, config.delimiter, config.discretization)
        .context("Failed to read data set")?;
    log::info!(
        "read and discretized {} attributes x {} instances in {:.3}s",
        dataset.num_attributes(),
        dataset.num_instances(),
        started.elapsed().as_secs_f64()
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if matches.get_flag("write_data") {
        dataset
            .write_to(&mut out, config.delimiter)
            .context("Failed to write data set")?;
        out.flush()?;
        return Ok(());
    }

    let selector = MrmrSelector::new(&dataset, config.class_attribute)
        .context("Invalid class attribute selection")?;
    let records = selector.rank();
    write_ranking(&mut out, &records).context("Failed to write ranking")?;
    out.flush()?;
    log::info!("ranked {} attributes in {:.3}s", records.len(), started.elapsed().as_secs_f64());

    Ok(())
}
