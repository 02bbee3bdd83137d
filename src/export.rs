use super::VERSION;
use clap::{App, Arg, ArgMatches};
use std::path::{Path, PathBuf};

pub fn build_app() -> App<'static, 'static> {
    let arg_path = Arg::with_name("path")
        .help("path to the input file exported by the monitor")
        .required(true)
        .index(1);
    let arg_csvout = Arg::with_name("output_csvfile")
        .help("name of the output csv file")
        .short("o")
        .long("csvfile")
        .takes_value(true);
    let arg_verbose = Arg::with_name("verbose")
        .help("print verbose information")
        .short("v")
        .long("verbose")
        .takes_value(false)
        .required(false);
    App::new("Tanita_export")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to export the Tanita BC-601 records as a csv table, one column per field")
        .arg(arg_path)
        .arg(arg_csvout)
        .arg(arg_verbose)
}

/// csv next to the input, without overwriting an input that is already a csv
pub fn default_csvout(input: &Path) -> PathBuf {
    if input.extension().map_or(false, |e| e == "csv") {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        input.with_file_name(format!("{}_series.csv", stem))
    } else {
        input.with_extension("csv")
    }
}

/// Returns the input file, the output csv, and the verbose flag.
pub fn paths_from_matches(cli_args: &ArgMatches) -> (PathBuf, PathBuf, bool) {
    let input = PathBuf::from(cli_args.value_of("path").unwrap_or_default());
    let csvout = match cli_args.value_of("output_csvfile") {
        Some(p) => PathBuf::from(p),
        None => default_csvout(&input),
    };
    (input, csvout, cli_args.is_present("verbose"))
}

/// Takes the CLI arguments that control the csv export.
pub fn parse_cli() -> (PathBuf, PathBuf, bool) {
    let cli_args = build_app().get_matches();
    paths_from_matches(&cli_args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_defaults_next_to_input() {
        let m = build_app()
            .get_matches_from_safe(&["tanita_export", "data/BC601.txt"])
            .unwrap();
        let (input, csvout, verbose) = paths_from_matches(&m);
        assert_eq!(input, PathBuf::from("data/BC601.txt"));
        assert_eq!(csvout, PathBuf::from("data/BC601.csv"));
        assert!(!verbose);
    }

    #[test]
    fn csv_input_is_not_overwritten() {
        assert_eq!(
            default_csvout(Path::new("data/BC601.csv")),
            PathBuf::from("data/BC601_series.csv")
        );
    }

    #[test]
    fn explicit_csvfile() {
        let m = build_app()
            .get_matches_from_safe(&["tanita_export", "in.txt", "--csvfile", "out.csv", "-v"])
            .unwrap();
        let (_, csvout, verbose) = paths_from_matches(&m);
        assert_eq!(csvout, PathBuf::from("out.csv"));
        assert!(verbose);
    }
}
