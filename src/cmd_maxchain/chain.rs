use anyhow::Result;
use clap::*;
use maxchain::libs::max_chain::{max_chain, ChainConfig, Outcome};
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("chain")
        .about("Find the heaviest chain of shared hits across sequences")
        .after_help(
            r###"
Each input file holds the hits of one sequence, tab-separated:

    label  start  end  weight  [name]

Lines starting with `#` are ignored. Unnamed hits are called `<file>:<line>`.

Processing:
  1. Keep labels that occur in every sequence.
  2. Build boxes: one hit per sequence, all with the same label.
     The weight of a box is the mean weight of its hits.
     --max-boxes trims low-weight hits until at most that many boxes remain.
  3. Sweep the box corners with a range tree to find the heaviest chain of
     boxes that are ordered consistently in every sequence.

Output:
  One line per box: label, the `start-end` range in each sequence, the box
  weight and the name of the hit in the first sequence. A `# weight` line
  closes the chain. When --limit is exceeded, only a `# skipped` line is
  written.

Examples:
  maxchain chain human.tsv mouse.tsv
  maxchain chain human.tsv mouse.tsv rat.tsv --max-boxes 10000 --seed 7

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
            Arg::new("max_dims")
                .long("max-dims")
                .num_args(1)
                .default_value("5")
                .value_parser(value_parser!(usize))
                .help("Maximum number of sequences"),
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
            Arg::new("limit")
                .long("limit")
                .num_args(1)
                .value_parser(value_parser!(u64))
                .help("Skip the chain when more boxes remain"),
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
    //----------------------------
    // Args
    //----------------------------
    let infiles: Vec<&String> = args.get_many::<String>("infiles").unwrap().collect();
    let config = ChainConfig::default()
        .with_max_dimensions(*args.get_one::<usize>("max_dims").unwrap())
        .with_max_boxes(*args.get_one::<u64>("max_boxes").unwrap())
        .with_box_limit(args.get_one::<u64>("limit").copied())
        .with_seed(*args.get_one::<u64>("seed").unwrap());

    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    //----------------------------
    // Ops
    //----------------------------
    let sequences = super::read_sequences(infiles.iter().copied())?;
    let outcome = max_chain(&sequences, &config)?;

    //----------------------------
    // Output
    //----------------------------
    let chain = match outcome {
        Outcome::Chain(chain) => chain,
        Outcome::Skipped { boxes, limit } => {
            writer.write_fmt(format_args!(
                "# skipped\t{} boxes exceed the limit of {}\n",
                boxes, limit
            ))?;
            return Ok(());
        }
    };

    let header = infiles
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join("\t");
    writer.write_fmt(format_args!("#label\t{}\tweight\tname\n", header))?;

    for bx in &chain.boxes {
        let ranges = bx
            .members
            .iter()
            .enumerate()
            .map(|(s, &i)| format!("{}-{}", sequences[s][i].start, sequences[s][i].end))
            .collect::<Vec<_>>()
            .join("\t");
        writer.write_fmt(format_args!(
            "{}\t{}\t{}\t{}\n",
            bx.label,
            ranges,
            bx.weight,
            bx.payload(&sequences)
        ))?;
    }
    writer.write_fmt(format_args!("# weight\t{}\n", chain.weight))?;

    Ok(())
}
