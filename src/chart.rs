use crate::error::TanitaError;
use crate::{min_and_max, suitable_xfmt};
use chrono::prelude::*;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;

/// Line colors, picked in order for the series of a chart.
pub const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

const LEGEND_COLUMNS: usize = 3;
const LEGEND_ROW_HEIGHT: u32 = 30;
const LEGEND_PADDING: u32 = 10;
const MARKER_SIZE: i32 = 4;

#[derive(Debug, Clone, Copy)]
pub struct LabeledSeries<'a> {
    pub label: &'a str,
    pub values: &'a [f64],
}

/// A shared time axis and the labeled series to draw against it.
#[derive(Debug, Clone)]
pub struct ChartInput<'a> {
    pub time: &'a [NaiveDateTime],
    pub series: Vec<LabeledSeries<'a>>,
    pub y_desc: &'a str,
}

impl<'a> ChartInput<'a> {
    pub fn new(time: &'a [NaiveDateTime], y_desc: &'a str) -> ChartInput<'a> {
        ChartInput {
            time,
            series: Vec::new(),
            y_desc,
        }
    }

    pub fn with_series(mut self, label: &'a str, values: &'a [f64]) -> ChartInput<'a> {
        self.series.push(LabeledSeries { label, values });
        self
    }

    /// every series must have one value per time
    pub fn check(&self) -> Result<(), TanitaError> {
        if self.time.is_empty() || self.series.is_empty() {
            return Err(TanitaError::EmptySeries);
        }
        for s in self.series.iter() {
            if s.values.len() != self.time.len() {
                return Err(TanitaError::LengthMismatch {
                    label: s.label.to_string(),
                    expected: self.time.len(),
                    found: s.values.len(),
                });
            }
        }
        Ok(())
    }
}

/// Renders line charts to in-memory PNG images.
/// Each call draws on its own pixel buffer, so successive charts are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        ChartRenderer {
            width: 1280,
            height: 720,
        }
    }
}

impl ChartRenderer {
    pub fn new(width: u32, height: u32) -> ChartRenderer {
        ChartRenderer { width, height }
    }

    pub fn render_png(&self, input: &ChartInput<'_>) -> Result<Vec<u8>, TanitaError> {
        input.check()?;
        let pixels = self.draw(input)?;
        let mut png: Vec<u8> = Vec::new();
        PngEncoder::new(&mut png).write_image(&pixels, self.width, self.height, ColorType::Rgb8)?;
        Ok(png)
    }

    fn draw(&self, input: &ChartInput<'_>) -> Result<Vec<u8>, TanitaError> {
        let mut pixels = vec![0u8; self.width as usize * self.height as usize * 3];
        {
            let root =
                BitMapBackend::with_buffer(&mut pixels, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE)?;
            let rows = (input.series.len() + LEGEND_COLUMNS - 1) / LEGEND_COLUMNS;
            let legend_height = rows as u32 * LEGEND_ROW_HEIGHT + 2 * LEGEND_PADDING;
            let (legend_area, plot_area) = root.split_vertically(legend_height);
            draw_legend(&legend_area, &input.series)?;
            draw_lines(&plot_area, input)?;
            root.present()?;
        }
        Ok(pixels)
    }
}

/// legend strip above the plot, filled row by row
fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: &[LabeledSeries<'_>],
) -> Result<(), TanitaError> {
    let (width, _) = area.dim_in_pixel();
    let columns = series.len().min(LEGEND_COLUMNS).max(1);
    let column_width = width as i32 / columns as i32;
    for (i, s) in series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let x = (i % columns) as i32 * column_width + column_width / 4;
        let y = (LEGEND_PADDING + (i / columns) as u32 * LEGEND_ROW_HEIGHT + LEGEND_ROW_HEIGHT / 2)
            as i32;
        area.draw(&PathElement::new(
            vec![(x, y), (x + 30, y)],
            color.stroke_width(2),
        ))?;
        area.draw(&Circle::new((x + 15, y), MARKER_SIZE, color.filled()))?;
        area.draw(&Text::new(
            s.label.to_string(),
            (x + 40, y - 9),
            ("sans-serif", 18.0).into_font(),
        ))?;
    }
    Ok(())
}

fn draw_lines<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    input: &ChartInput<'_>,
) -> Result<(), TanitaError> {
    let (xmindt, xmaxdt) = min_and_max(input.time).ok_or(TanitaError::EmptySeries)?;
    let xspan: chrono::Duration = xmaxdt - xmindt;
    let xmargin = if xspan > chrono::Duration::zero() {
        xspan / 20
    } else {
        chrono::Duration::days(1)
    };
    let xminlocal = TimeZone::from_utc_datetime(&Utc, &(xmindt - xmargin));
    let xmaxlocal = TimeZone::from_utc_datetime(&Utc, &(xmaxdt + xmargin));
    let xfmt = suitable_xfmt(xspan + xmargin * 2);

    let all_values: Vec<f64> = input
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .collect();
    let (ymin, ymax) = min_and_max(&all_values[..]).ok_or(TanitaError::EmptySeries)?;
    let ymargin = if ymax > ymin { (ymax - ymin) / 10f64 } else { 1f64 };

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(120)
        .y_label_area_size(90)
        .build_cartesian_2d(xminlocal..xmaxlocal, (ymin - ymargin)..(ymax + ymargin))?;
    chart
        .configure_mesh()
        .light_line_style(&TRANSPARENT)
        .bold_line_style(RGBColor(200, 200, 200).stroke_width(1))
        .set_all_tick_mark_size(2)
        .label_style(("sans-serif", 18))
        .x_label_style(
            ("sans-serif", 16.0)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_labels(14)
        .x_label_formatter(&|x: &DateTime<Utc>| x.format(xfmt).to_string())
        .y_label_formatter(&|y: &f64| format!("{:.1}", y))
        .y_desc(input.y_desc)
        .draw()?;

    for (i, s) in input.series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let points: Vec<(DateTime<Utc>, f64)> = input
            .time
            .iter()
            .zip(s.values.iter())
            .map(|(t, v)| (TimeZone::from_utc_datetime(&Utc, t), *v))
            .collect();
        chart.draw_series(LineSeries::new(
            points.iter().copied(),
            color.stroke_width(2),
        ))?;
        chart.draw_series(
            points
                .iter()
                .map(|p| Circle::new(*p, MARKER_SIZE, color.filled())),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    fn days(n: u32) -> Vec<NaiveDateTime> {
        (1..=n)
            .map(|d| {
                NaiveDate::from_ymd_opt(2015, 3, d)
                    .unwrap()
                    .and_hms_opt(7, 0, 0)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn renders_png_of_requested_size() {
        let time = days(4);
        let total = [17.2, 17.0, 16.9, 16.5];
        let trunk = [18.6, 18.5, 18.1, 18.0];
        let input = ChartInput::new(&time, "fat [%]")
            .with_series("Total", &total)
            .with_series("Trunk", &trunk);
        let png = ChartRenderer::new(640, 480).render_png(&input).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (640, 480));
    }

    #[test]
    fn identical_inputs_give_identical_images() {
        let time = days(3);
        let values = [61.7, 61.9, 62.0];
        let input = ChartInput::new(&time, "muscle [%]").with_series("Total", &values);
        let renderer = ChartRenderer::new(400, 300);
        let first = renderer.render_png(&input).unwrap();
        let second = renderer.render_png(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn successive_renders_do_not_leak() {
        let time = days(3);
        let fat = [17.2, 17.0, 16.8];
        let arm = [14.1, 14.0, 13.9];
        let muscle = [61.7, 61.9, 62.0];
        let renderer = ChartRenderer::new(400, 300);

        let crowded = ChartInput::new(&time, "fat [%]")
            .with_series("Total", &fat)
            .with_series("Left arm", &arm);
        let single = ChartInput::new(&time, "muscle [%]").with_series("Total", &muscle);

        let crowded_png = renderer.render_png(&crowded).unwrap();
        let after = renderer.render_png(&single).unwrap();
        let fresh = ChartRenderer::new(400, 300).render_png(&single).unwrap();
        assert_eq!(after, fresh);
        assert_ne!(crowded_png, after);
    }

    #[test]
    fn single_measurement_renders() {
        let time = days(1);
        let values = [17.2];
        let input = ChartInput::new(&time, "fat [%]").with_series("Total", &values);
        let png = ChartRenderer::new(320, 240).render_png(&input).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);
    }

    #[test]
    fn length_mismatch_fails() {
        let time = days(3);
        let short = [1.0, 2.0];
        let input = ChartInput::new(&time, "fat [%]").with_series("Trunk", &short);
        match ChartRenderer::default().render_png(&input) {
            Err(TanitaError::LengthMismatch {
                label,
                expected,
                found,
            }) => {
                assert_eq!(label, "Trunk");
                assert_eq!((expected, found), (3, 2));
            }
            other => panic!("expected length mismatch, got {:?}", other.map(|p| p.len())),
        }
    }

    #[test]
    fn empty_axis_fails() {
        let input = ChartInput::new(&[], "fat [%]").with_series("Total", &[]);
        assert!(matches!(
            ChartRenderer::default().render_png(&input),
            Err(TanitaError::EmptySeries)
        ));
    }
}
