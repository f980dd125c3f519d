use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

use crate::config::ProbeBackend;

pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Split MP3 files into equal-length tagged tracks and zip them up")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("artist")
                .short('a')
                .long("artist")
                .value_name("ARTIST")
                .help("Artist tag for every track"),
        )
        .arg(
            Arg::new("album")
                .short('b')
                .long("album")
                .value_name("ALBUM")
                .help("Album tag for every track"),
        )
        .arg(
            Arg::new("tracks")
                .short('n')
                .long("tracks")
                .value_name("COUNT")
                .help("Number of tracks to split each file into (1-50) [default: 10]")
                .value_parser(value_parser!(u32).range(1..=50)),
        )
        .arg(
            Arg::new("manifest")
                .short('m')
                .long("manifest")
                .value_name("FILE")
                .help("TOML file listing inputs with per-file artist, album and track count")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("OUTPUT_DIR")
                .help("Directory where the archive is written [default: .]")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("archive-name")
                .long("archive-name")
                .value_name("NAME")
                .help("File name of the archive [default: split_tracks.zip]"),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .help("Replace an existing archive")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-segments")
                .long("keep-segments")
                .value_name("DIR")
                .help("Also copy the individual tracks into DIR")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("probe")
                .long("probe")
                .value_name("BACKEND")
                .help("How durations are read [default: ffprobe]")
                .value_parser(value_parser!(ProbeBackend)),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Probe inputs and print the tracks that would be written")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Exit with an error if any file was skipped or any track failed")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("inputs")
                .value_name("INPUT")
                .help("MP3 files or directories containing them, processed in the order given")
                .num_args(1..)
                .required_unless_present("manifest")
                .value_parser(value_parser!(PathBuf)),
        )
}
