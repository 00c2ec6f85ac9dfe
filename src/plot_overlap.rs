use crate::{
    ComparisonStats as Stats,
    fmt_utils::group_digits,
    venn::VennLayout,
};

use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use plotters_backend::DrawingBackend;
use std::error::Error;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "render", about = "Plots read overlap between two genome alignments")]
pub struct Cli {
    #[structopt(flatten)]
    pub stats: Stats,

    /// Existing directory to write overlap_plot.png into
    #[structopt(parse(from_os_str))]
    pub outdir: PathBuf,
}

pub const DPI: u32 = 300;
/// 16 x 6 inches
pub const FIGURE_SIZE: (u32, u32) = (16 * DPI, 6 * DPI);

pub const GENOME1_COLOR: RGBColor = RGBColor(0x34, 0x98, 0xdb);
pub const GENOME2_COLOR: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);
pub const OVERLAP_COLOR: RGBColor = RGBColor(0x9b, 0x59, 0xb6);

// Points per arc when tracing the overlap region
const LENS_STEPS: usize = 180;

/// Font size in points converted to pixels at the figure's resolution.
pub fn pt(points: f64) -> f64 {
    points * DPI as f64 / 72.0
}

fn font(size: f64, style: FontStyle) -> TextStyle<'static> {
    ("sans-serif", size).into_font().style(style).color(&BLACK)
}

fn centred() -> Pos {
    Pos::new(HPos::Center, VPos::Center)
}

/// Draws lines of text stacked around `centre`.
fn draw_lines<DB>(
    area: &DrawingArea<DB, Shift>,
    lines: &[String],
    centre: (i32, i32),
    size: f64,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let line_height = (size * 1.25) as i32;
    let top = centre.1 - line_height * (lines.len() as i32 - 1) / 2;

    for (i, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.as_str(),
            (centre.0, top + i as i32 * line_height),
            font(size, FontStyle::Normal).pos(centred()),
        ))?;
    }

    Ok(())
}

fn draw_venn<DB>(area: &DrawingArea<DB, Shift>, stats: &Stats) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let area = area.titled("Read Overlap Between Genomes", font(pt(20.0), FontStyle::Bold))?;
    let (w, h) = area.dim_in_pixel();

    let footnote_height = (pt(14.0) * 2.5) as i32;
    let (diagram, footnote) = area.split_vertically(h as i32 - footnote_height);

    footnote.draw(&Text::new(
        stats.totals_footnote(),
        (w as i32 / 2, footnote_height / 2),
        font(pt(14.0), FontStyle::Italic).pos(centred()),
    ))?;

    let layout = VennLayout::solve(stats.unique1, stats.unique2, stats.overlap);
    debug!("Venn layout: {:?}", layout);

    // Fit the circles into what is left after the set labels
    let margin = pt(10.0);
    let set_label_height = pt(20.0) * 1.5;
    let (_, diagram_h) = diagram.dim_in_pixel();
    let avail_w = w as f64 - 2.0 * margin;
    let avail_h = diagram_h as f64 - 2.0 * margin - set_label_height;

    let (x_min, x_max, y_min, y_max) = layout.bounds();
    let scale = (avail_w / (x_max - x_min)).min(avail_h / (y_max - y_min));
    let mid_x = (x_min + x_max) / 2.0;
    let mid_y = margin + avail_h / 2.0;

    let to_px = |(x, y): (f64, f64)| -> (i32, i32) {
        (
            (w as f64 / 2.0 + (x - mid_x) * scale).round() as i32,
            (mid_y + y * scale).round() as i32,
        )
    };
    let r1 = ((layout.r1 * scale).round() as u32).max(1);
    let r2 = ((layout.r2 * scale).round() as u32).max(1);
    let [c1, c2] = layout.centres();

    diagram.draw(&Circle::new(to_px(c1), r1, GENOME1_COLOR.mix(0.6).filled()))?;
    diagram.draw(&Circle::new(to_px(c2), r2, GENOME2_COLOR.mix(0.6).filled()))?;

    if let Some(outline) = layout.lens_outline(LENS_STEPS) {
        let points: Vec<(i32, i32)> = outline.into_iter().map(to_px).collect();
        // Blank out the blended colours first so the overlap reads as its own colour
        diagram.draw(&Polygon::new(points.clone(), WHITE.filled()))?;
        diagram.draw(&Polygon::new(points, OVERLAP_COLOR.mix(0.6).filled()))?;
    }

    let anchors = layout.anchors();
    for (label, anchor) in [
        (stats.unique1_label(), anchors.only1),
        (stats.unique2_label(), anchors.only2),
        (stats.overlap_label(), anchors.both),
    ]
    .iter()
    {
        if let Some(lines) = label {
            draw_lines(&diagram, lines, to_px(*anchor), pt(14.0))?;
        }
    }

    // Set names go under the lowest point of either circle
    for (name, centre) in [(&stats.genome1, c1), (&stats.genome2, c2)].iter() {
        let (x, y) = to_px((centre.0, y_max));
        diagram.draw(&Text::new(
            name.as_str(),
            (x, y + (margin / 2.0) as i32),
            font(pt(20.0), FontStyle::Normal).pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;
    }

    Ok(())
}

fn segment_end(i: usize, n: usize) -> SegmentValue<usize> {
    if i + 1 < n {
        SegmentValue::Exact(i + 1)
    } else {
        SegmentValue::Last
    }
}

fn draw_bars<DB>(area: &DrawingArea<DB, Shift>, stats: &Stats) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let values = stats.bar_values();
    let categories = stats.bar_categories();
    let colors = [GENOME1_COLOR, OVERLAP_COLOR, GENOME2_COLOR];
    let n = values.len();

    let mut chart = ChartBuilder::on(area)
        .caption("Read Distribution", font(pt(20.0), FontStyle::Bold))
        .margin(pt(10.0) as u32)
        .x_label_area_size((pt(13.0) * 2.0) as u32)
        .y_label_area_size((pt(14.0) * 7.0) as u32)
        // Integer ranges are inclusive here, so 0..2 holds three segments
        .build_cartesian_2d((0usize..n - 1).into_segmented(), 0f64..stats.y_upper_bound())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(&BLACK.mix(0.3))
        .light_line_style(&WHITE)
        .x_labels(n)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => categories.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|v| group_digits(v.round() as u64))
        .x_label_style(font(pt(13.0), FontStyle::Normal))
        .y_label_style(font(pt(14.0), FontStyle::Normal))
        .y_desc("Number of Reads")
        .axis_desc_style(font(pt(18.0), FontStyle::Bold))
        .draw()?;

    let gap = pt(12.0) as u32;
    let bar = |i: usize, value: u64, style: ShapeStyle| {
        let mut rect = Rectangle::new(
            [(SegmentValue::Exact(i), 0f64), (segment_end(i, n), value as f64)],
            style,
        );
        rect.set_margin(0, 0, gap, gap);
        rect
    };

    chart.draw_series(
        values
            .iter()
            .zip(colors.iter())
            .enumerate()
            .map(|(i, (v, color))| bar(i, *v, color.mix(0.8).filled())),
    )?;
    chart.draw_series(
        values
            .iter()
            .enumerate()
            .map(|(i, v)| bar(i, *v, BLACK.stroke_width(4))),
    )?;

    chart.draw_series(values.iter().enumerate().map(|(i, v)| {
        Text::new(
            group_digits(*v),
            (SegmentValue::CenterOf(i), *v as f64),
            font(pt(16.0), FontStyle::Bold).pos(Pos::new(HPos::Center, VPos::Bottom)),
        )
    }))?;

    Ok(())
}

/// Draws the Venn diagram and the bar chart side by side onto `backend`.
pub fn run<B>(stats: &Stats, backend: B) -> Result<(), Box<dyn Error>>
where
    B: DrawingBackend,
    B::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let body = root
        .margin(pt(8.0) as i32, pt(8.0) as i32, pt(8.0) as i32, pt(8.0) as i32)
        .titled(&stats.title(), font(pt(22.0), FontStyle::Bold))?;

    let panels = body.split_evenly((1, 2));
    draw_venn(&panels[0], stats)?;
    draw_bars(&panels[1], stats)?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(a: &[&str]) -> Vec<String> {
        std::iter::once("render")
            .chain(a.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_cli_parses_all_positionals() {
        let cli = Cli::from_iter_safe(args(&["hg38", "mm10", "100", "50", "25", "125", "75", "out"]))
            .unwrap();

        assert_eq!(
            cli.stats,
            Stats {
                genome1: String::from("hg38"),
                genome2: String::from("mm10"),
                unique1: 100,
                unique2: 50,
                overlap: 25,
                count1: 125,
                count2: 75,
            }
        );
        assert_eq!(cli.outdir, PathBuf::from("out"));
    }

    #[test]
    fn test_cli_rejects_missing_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let outdir = dir.path().to_str().unwrap();

        // Seven arguments, the output directory is taken as a count
        assert!(Cli::from_iter_safe(args(&["hg38", "mm10", "100", "50", "25", "125", outdir])).is_err());
        assert!(Cli::from_iter_safe(args(&["hg38", "mm10", "100"])).is_err());
        assert!(Cli::from_iter_safe(args(&[])).is_err());

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_cli_rejects_non_integers() {
        for bad in ["1.5", "ten", "-3", ""].iter() {
            assert!(
                Cli::from_iter_safe(args(&["hg38", "mm10", *bad, "50", "25", "125", "75", "out"])).is_err(),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_cli_rejects_extra_arguments() {
        assert!(Cli::from_iter_safe(args(&["hg38", "mm10", "1", "2", "3", "4", "5", "out", "more"])).is_err());
    }

    #[test]
    fn test_figure_size() {
        assert_eq!(FIGURE_SIZE, (4800, 1800));
        assert!((pt(72.0) - 300.0).abs() < 1e-9);
    }

    fn stats(unique1: u64, unique2: u64, overlap: u64, count1: u64, count2: u64) -> Stats {
        Stats {
            genome1: String::from("hg38"),
            genome2: String::from("mm10"),
            unique1,
            unique2,
            overlap,
            count1,
            count2,
        }
    }

    fn render_to_tempdir(stats: &Stats) {
        let dir = tempfile::tempdir().unwrap();
        let out_path = crate::io_utils::get_output_path(dir.path()).unwrap();

        run(stats, BitMapBackend::new(&out_path, FIGURE_SIZE)).unwrap();

        assert_eq!(out_path.file_name().unwrap(), "overlap_plot.png");
        assert!(std::fs::metadata(&out_path).unwrap().len() > 0);
    }

    #[test]
    fn test_run_writes_png() {
        render_to_tempdir(&stats(100, 50, 25, 125, 75));
    }

    #[test]
    fn test_run_all_zero_counts() {
        render_to_tempdir(&stats(0, 0, 0, 0, 0));
    }

    #[test]
    fn test_run_one_empty_set() {
        render_to_tempdir(&stats(500, 0, 0, 500, 0));
    }

    #[test]
    fn test_run_nested_sets() {
        render_to_tempdir(&stats(300, 0, 100, 400, 100));
    }

    #[test]
    fn test_run_large_counts() {
        render_to_tempdir(&stats(1_234_567_890, 987_654_321, 55_555_555, 1_290_123_445, 1_043_209_876));
    }

    #[test]
    fn test_font_carries_style() {
        assert!(matches!(font(pt(20.0), FontStyle::Bold).font.get_style(), FontStyle::Bold));
        assert!(matches!(font(pt(14.0), FontStyle::Italic).font.get_style(), FontStyle::Italic));
        assert!((font(pt(14.0), FontStyle::Normal).font.get_size() - pt(14.0)).abs() < 1e-9);
    }

    #[test]
    fn test_segment_end() {
        assert!(matches!(segment_end(0, 3), SegmentValue::Exact(1)));
        assert!(matches!(segment_end(1, 3), SegmentValue::Exact(2)));
        assert!(matches!(segment_end(2, 3), SegmentValue::Last));
    }
}
