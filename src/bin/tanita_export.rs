use log::{error, info};
use tanita_lpp::export::parse_cli;
use tanita_lpp::report::read_measurements;
use tanita_lpp::{Series, TanitaError};

fn export(fin: &std::path::Path, csvout: &std::path::Path) -> Result<usize, TanitaError> {
    let measurements = read_measurements(fin)?;
    let series = Series::from_measurements(&measurements);
    series.to_csv(csvout)?;
    Ok(series.len())
}

fn main() {
    let (csvin, csvout, verbose) = parse_cli();
    tanita_lpp::init_logger(verbose);
    info!(
        "read data from {} and save to {}",
        csvin.display(),
        csvout.display()
    );
    match export(&csvin, &csvout) {
        Ok(n) => info!("exported {} measurements", n),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
