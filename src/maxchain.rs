extern crate clap;
use clap::*;

mod cmd_maxchain;

fn main() -> anyhow::Result<()> {
    let app = Command::new("maxchain")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`maxchain` - Maximal chains of motif hits across related sequences")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug messages to stderr"),
        )
        .subcommand(cmd_maxchain::chain::make_subcommand())
        .subcommand(cmd_maxchain::boxes::make_subcommand())
        .after_help(
            r###"Subcommands:

* chain - Heaviest chain of same-label hits shared by all sequences
* boxes - Boxes (one hit per sequence, same label) fed to the chain

Set RUST_LOG to control logging, e.g. RUST_LOG=maxchain=debug.

"###,
        );

    let matches = app.get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Check which subcomamnd the user ran...
    match matches.subcommand() {
        Some(("chain", sub_matches)) => cmd_maxchain::chain::execute(sub_matches),
        Some(("boxes", sub_matches)) => cmd_maxchain::boxes::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
