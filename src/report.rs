use crate::chart::{ChartInput, ChartRenderer};
use crate::error::TanitaError;
use crate::measurement::{LineParser, Measurement};
use crate::series::{Field, Series};
use crate::{FAT_PNG, MUSCLE_PNG};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// The two charts of the report, each with the total and the five body regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakdown {
    Fat,
    Muscle,
}

impl Breakdown {
    pub const ALL: [Breakdown; 2] = [Breakdown::Fat, Breakdown::Muscle];

    pub fn file_name(self) -> &'static str {
        match self {
            Breakdown::Fat => FAT_PNG,
            Breakdown::Muscle => MUSCLE_PNG,
        }
    }

    pub fn y_desc(self) -> &'static str {
        match self {
            Breakdown::Fat => "body fat [%]",
            Breakdown::Muscle => "muscle [%]",
        }
    }

    /// labels and fields, in legend order
    pub fn fields(self) -> [(&'static str, Field); 6] {
        match self {
            Breakdown::Fat => [
                ("Total", Field::Fat),
                ("Left arm", Field::FatLeftArm),
                ("Right arm", Field::FatRightArm),
                ("Left leg", Field::FatLeftLeg),
                ("Right leg", Field::FatRightLeg),
                ("Trunk", Field::FatTrunk),
            ],
            Breakdown::Muscle => [
                ("Total", Field::Muscle),
                ("Left arm", Field::MuscleLeftArm),
                ("Right arm", Field::MuscleRightArm),
                ("Left leg", Field::MuscleLeftLeg),
                ("Right leg", Field::MuscleRightLeg),
                ("Trunk", Field::MuscleTrunk),
            ],
        }
    }

    pub fn chart_input<'a>(self, series: &'a Series) -> ChartInput<'a> {
        self.fields()
            .iter()
            .fold(ChartInput::new(&series.time, self.y_desc()), |input, &(label, field)| {
                input.with_series(label, series.get(field))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub renderer: ChartRenderer,
}

impl ReportConfig {
    pub fn new(input: PathBuf) -> ReportConfig {
        ReportConfig {
            input,
            output_dir: PathBuf::from("."),
            renderer: ChartRenderer::default(),
        }
    }
}

/// Reads and parses every line of the file, stopping at the first malformed line.
pub fn read_measurements(fin: &Path) -> Result<Vec<Measurement>, TanitaError> {
    if !fin.is_file() {
        return Err(TanitaError::MissingInput(fin.to_path_buf()));
    }
    let io_err = |source| TanitaError::Io {
        path: fin.to_path_buf(),
        source,
    };
    let file = File::open(fin).map_err(io_err)?;
    let buf = BufReader::new(file);
    let parser = LineParser::new();
    let mut measurements = Vec::new();
    for (i, l) in buf.lines().enumerate() {
        let l = l.map_err(io_err)?;
        let m = parser
            .parse(&l)
            .map_err(|source| TanitaError::Parse { line: i + 1, source })?;
        debug!("line {}: measurement at {}", i + 1, m.timestamp);
        measurements.push(m);
    }
    info!("read {} measurements from {}", measurements.len(), fin.display());
    Ok(measurements)
}

/// Parses the input, aggregates it, and writes the fat and muscle charts.
/// Both charts are rendered before writing, so a rendering error leaves no file behind.
pub fn run(config: &ReportConfig) -> Result<Series, TanitaError> {
    let measurements = read_measurements(&config.input)?;
    let series = Series::from_measurements(&measurements);

    let mut rendered: Vec<(PathBuf, Vec<u8>)> = Vec::with_capacity(Breakdown::ALL.len());
    for &breakdown in Breakdown::ALL.iter() {
        let png = config.renderer.render_png(&breakdown.chart_input(&series))?;
        debug!("rendered {} ({} bytes)", breakdown.file_name(), png.len());
        rendered.push((config.output_dir.join(breakdown.file_name()), png));
    }

    for (fout, png) in rendered.iter() {
        std::fs::write(fout, png).map_err(|source| TanitaError::Io {
            path: fout.clone(),
            source,
        })?;
        info!("wrote {}", fout.display());
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::line_at;
    use crate::ParseError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn input_file(lines: &[String]) -> NamedTempFile {
        let mut temp = NamedTempFile::new().unwrap();
        for l in lines {
            writeln!(temp, "{}", l).unwrap();
        }
        temp
    }

    fn two_lines() -> Vec<String> {
        vec![
            line_at("01/03/2015", "07:15:30", 17.2, 61.7),
            line_at("08/03/2015", "07:02:11", 16.9, 62.1),
        ]
    }

    #[test]
    fn end_to_end_writes_both_charts() {
        let input = input_file(&two_lines());
        let out = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            output_dir: out.path().to_path_buf(),
            renderer: ChartRenderer::new(640, 480),
            ..ReportConfig::new(input.path().to_path_buf())
        };
        let series = run(&config).unwrap();
        assert_eq!(series.len(), 2);
        for &field in Field::ALL.iter() {
            assert_eq!(series.get(field).len(), 2);
        }
        assert_eq!(series.get(Field::Fat), &[17.2, 16.9][..]);
        for name in [FAT_PNG, MUSCLE_PNG].iter() {
            let bytes = std::fs::read(out.path().join(name)).unwrap();
            let img = image::load_from_memory(&bytes).unwrap();
            assert_eq!((img.width(), img.height()), (640, 480));
        }
    }

    #[test]
    fn missing_input_fails_before_writing() {
        let out = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            output_dir: out.path().to_path_buf(),
            ..ReportConfig::new(out.path().join("nope.csv"))
        };
        assert!(matches!(run(&config), Err(TanitaError::MissingInput(_))));
        assert!(!out.path().join(FAT_PNG).exists());
    }

    #[test]
    fn bad_line_aborts_whole_run() {
        let mut lines = two_lines();
        lines.insert(1, "DT,\"02/03/2015\",Ti,\"07:00:00\",Bt,0".to_string());
        let input = input_file(&lines);
        let out = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            output_dir: out.path().to_path_buf(),
            ..ReportConfig::new(input.path().to_path_buf())
        };
        match run(&config) {
            Err(TanitaError::Parse { line, source }) => {
                assert_eq!(line, 2);
                assert!(matches!(source, ParseError::NoMatch));
            }
            other => panic!("expected parse error, got {:?}", other.map(|s| s.len())),
        }
        assert!(!out.path().join(FAT_PNG).exists());
        assert!(!out.path().join(MUSCLE_PNG).exists());
    }

    #[test]
    fn empty_file_renders_nothing() {
        let input = input_file(&[]);
        let out = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            output_dir: out.path().to_path_buf(),
            ..ReportConfig::new(input.path().to_path_buf())
        };
        assert!(matches!(run(&config), Err(TanitaError::EmptySeries)));
        assert!(!out.path().join(FAT_PNG).exists());
    }

    #[test]
    fn breakdown_labels_and_order() {
        let labels: Vec<&str> = Breakdown::Fat.fields().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            vec!["Total", "Left arm", "Right arm", "Left leg", "Right leg", "Trunk"]
        );
        assert_eq!(Breakdown::Muscle.fields()[0].1, Field::Muscle);
        assert_eq!(Breakdown::Muscle.fields()[5].1, Field::MuscleTrunk);
    }

    #[test]
    fn chart_input_shares_time_axis() {
        let parser = LineParser::new();
        let measurements: Vec<Measurement> =
            two_lines().iter().map(|l| parser.parse(l).unwrap()).collect();
        let series = Series::from_measurements(&measurements);
        let input = Breakdown::Muscle.chart_input(&series);
        assert_eq!(input.time.len(), 2);
        assert_eq!(input.series.len(), 6);
        assert_eq!(input.series[0].values, &[61.7, 62.1][..]);
        assert!(input.check().is_ok());
    }
}
