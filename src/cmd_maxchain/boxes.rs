use anyhow::Result;
use clap::*;
use maxchain::libs::max_chain::generate_boxes;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("boxes")
        .about("List the boxes built from shared hits")
        .after_help(
            r###"
Input files are the same hit files `maxchain chain` reads.

Output:
  A summary line with the shared labels, the raw box count and the number of
  boxes kept, then one line per box: label, start point, end point, weight.

Examples:
  maxchain boxes human.tsv mouse.tsv --max-boxes 100

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("Hit files, one per sequence"),
        )
        .arg(
            Arg::new("max_boxes")
                .long("max-boxes")
                .num_args(1)
                .default_value("0")
                .value_parser(value_parser!(u64))
                .help("Trim candidates to at most this many boxes; 0 disables"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .num_args(1)
                .default_value("0")
                .value_parser(value_parser!(u64))
                .help("Seed for breaking weight ties while trimming"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> Result<()> {
    let infiles: Vec<&String> = args.get_many::<String>("infiles").unwrap().collect();
    let max_boxes = *args.get_one::<u64>("max_boxes").unwrap();
    let seed = *args.get_one::<u64>("seed").unwrap();

    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    let sequences = super::read_sequences(infiles.iter().copied())?;
    let box_set = generate_boxes(&sequences, sequences.len(), max_boxes, seed)?;

    writer.write_fmt(format_args!(
        "# labels\t{}\traw\t{}\tkept\t{}\n",
        box_set.labels().join(","),
        box_set.raw_count(),
        box_set.len()
    ))?;
    for bx in box_set.boxes() {
        writer.write_fmt(format_args!(
            "{}\t{}\t{}\t{}\n",
            bx.label, bx.start, bx.end, bx.weight
        ))?;
    }

    Ok(())
}
