//! Subcommand modules for the `maxchain` binary.

pub mod boxes;
pub mod chain;

use maxchain::libs::hit::read_hits;
use maxchain::libs::max_chain::Interval;

/// Loads one hit file per sequence, in command-line order.
pub fn read_sequences<'a, I>(infiles: I) -> anyhow::Result<Vec<Vec<Interval<String>>>>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut sequences = vec![];
    for infile in infiles {
        let hits = read_hits(infile)?;
        log::debug!("{}: {} hits", infile, hits.len());
        sequences.push(hits);
    }
    Ok(sequences)
}
