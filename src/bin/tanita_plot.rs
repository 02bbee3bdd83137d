use log::{error, info};
use tanita_lpp::plot::parse_cli;
use tanita_lpp::report::run;

fn main() {
    let (config, verbose) = parse_cli();
    tanita_lpp::init_logger(verbose);
    info!(
        "read data from {} and plot to {}",
        config.input.display(),
        config.output_dir.display()
    );
    match run(&config) {
        Ok(series) => info!("plotted {} measurements", series.len()),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
