pub mod chart;
pub mod error;
pub mod export;
pub mod measurement;
pub mod plot;
pub mod report;
pub mod series;

pub use error::{ParseError, TanitaError};
pub use measurement::{BodyType, Gender, LineParser, Measurement};
pub use series::{Field, Series};

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// date and time as written by the monitor, once merged
pub const DT_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
pub const DT_FORMAT_OUT: &str = "%Y-%m-%d %H:%M:%S";

pub const FAT_PNG: &str = "fat.png";
pub const MUSCLE_PNG: &str = "muscle.png";

/// Logs to stderr at info level, or debug when verbose; RUST_LOG takes precedence.
pub fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// None for an empty slice
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

pub fn suitable_xfmt(d: chrono::Duration) -> &'static str {
    let xfmt = if d > chrono::Duration::weeks(52) {
        "%Y-%m"
    } else if d > chrono::Duration::weeks(1) {
        "%y-%m-%d"
    } else if d > chrono::Duration::days(1) {
        "%m-%d %H"
    } else {
        "%d %H:%M"
    };
    return xfmt;
}
