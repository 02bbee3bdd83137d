use super::VERSION;
use crate::chart::ChartRenderer;
use crate::report::ReportConfig;
use clap::{value_t, App, Arg, ArgMatches};
use std::path::PathBuf;

pub fn build_app() -> App<'static, 'static> {
    let arg_path = Arg::with_name("path")
        .help("path to the input file exported by the monitor")
        .required(true)
        .index(1);
    let arg_output = Arg::with_name("output")
        .help("directory for the fat.png and muscle.png charts")
        .short("o")
        .long("output")
        .takes_value(true)
        .default_value(".");
    let arg_width = Arg::with_name("width")
        .help("width of the charts, in pixels")
        .long("width")
        .takes_value(true)
        .default_value("1280");
    let arg_height = Arg::with_name("height")
        .help("height of the charts, in pixels")
        .long("height")
        .takes_value(true)
        .default_value("720");
    let arg_verbose = Arg::with_name("verbose")
        .help("print verbose information")
        .short("v")
        .long("verbose")
        .takes_value(false)
        .required(false);
    App::new("Tanita_plot")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to plot the fat and muscle breakdown of the Tanita BC-601 records")
        .arg(arg_path)
        .arg(arg_output)
        .arg(arg_width)
        .arg(arg_height)
        .arg(arg_verbose)
}

/// Returns the report configuration and the verbose flag.
pub fn config_from_matches(cli_args: &ArgMatches) -> Result<(ReportConfig, bool), clap::Error> {
    let input = PathBuf::from(cli_args.value_of("path").unwrap_or_default());
    let output_dir = PathBuf::from(cli_args.value_of("output").unwrap_or("."));
    let width = value_t!(cli_args, "width", u32)?;
    let height = value_t!(cli_args, "height", u32)?;
    if width == 0 || height == 0 {
        return Err(clap::Error::with_description(
            "chart width and height must be positive",
            clap::ErrorKind::InvalidValue,
        ));
    }
    let config = ReportConfig {
        input,
        output_dir,
        renderer: ChartRenderer::new(width, height),
    };
    Ok((config, cli_args.is_present("verbose")))
}

/// Takes the CLI arguments that control the plotting, exits on invalid arguments.
pub fn parse_cli() -> (ReportConfig, bool) {
    let cli_args = build_app().get_matches();
    config_from_matches(&cli_args).unwrap_or_else(|e| e.exit())
}
