use crate::cli::DigitizeArgs;
use crate::error::{CliError, Result};
use detgeo::core::io::hits::{read_hits, write_hits};
use detgeo::readout::{EnergyRescale, EventStore, ThresholdFilter};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use tracing::info;

const RAW: &str = "SiTargetHits";
const RESCALED: &str = "SiTargetHitsMIP";
const DIGITIZED: &str = "SiTargetDigiHits";

pub fn run(args: DigitizeArgs) -> Result<()> {
    if args.mip_value <= 0.0 {
        return Err(CliError::Argument(format!(
            "MIP value must be positive, got {}",
            args.mip_value
        )));
    }

    let hits = read_hits(BufReader::new(File::open(&args.input)?))?;
    let total = hits.len();

    let mut store = EventStore::new();
    store.insert(RAW, hits)?;
    EnergyRescale::from_mip_value(RAW, RESCALED, args.mip_value).execute(&mut store)?;
    let passing = ThresholdFilter::new(RESCALED, DIGITIZED, args.threshold).execute(&mut store)?;

    write_hits(store.get(DIGITIZED)?, BufWriter::new(File::create(&args.output)?))?;
    info!(
        "Digitized '{}': {total} hits in, {passing} above threshold, written to '{}'",
        args.input.display(),
        args.output.display()
    );
    println!("{total} hits in, {passing} kept");
    Ok(())
}
