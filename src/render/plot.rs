//! SVG smile chart
//!
//! Draws the surface as one smile polyline per expiry, strike on the
//! x-axis and implied vol (%) on the y-axis. Output is a standalone SVG
//! file.

use std::path::Path;

use plotters::prelude::*;

use crate::core::{SurfaceError, SurfaceResult, VolSurface};

/// Render one smile line per expiry into an SVG file
pub fn render_smile_svg(
    surface: &VolSurface,
    path: impl AsRef<Path>,
    title: &str,
) -> SurfaceResult<()> {
    let (x_min, x_max) = padded_range(
        surface.strikes.first().copied().unwrap_or(0.0),
        surface.strikes.last().copied().unwrap_or(0.0),
    );
    let (vol_lo, vol_hi) = surface
        .vol_range()
        .ok_or_else(|| SurfaceError::render("no populated cells to plot"))?;
    let (y_min, y_max) = padded_range(vol_lo, vol_hi);
    let y_min = y_min.max(0.0);

    let root = SVGBackend::new(path.as_ref(), (1280, 768)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| SurfaceError::render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(title, ("sans-serif", 30))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| SurfaceError::render(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Strike")
        .y_desc("Implied Vol (%)")
        .draw()
        .map_err(|e| SurfaceError::render(e.to_string()))?;

    for (idx, &expiry) in surface.expiries.iter().enumerate() {
        let smile = surface.smile(expiry);
        if smile.is_empty() {
            continue;
        }

        let color = Palette99::pick(idx).to_rgba();

        chart
            .draw_series(
                smile
                    .iter()
                    .map(|&point| Circle::new(point, 3, color.filled())),
            )
            .map_err(|e| SurfaceError::render(e.to_string()))?;

        chart
            .draw_series(std::iter::once(PathElement::new(
                smile,
                color.stroke_width(2),
            )))
            .map_err(|e| SurfaceError::render(e.to_string()))?
            .label(expiry.to_string())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| SurfaceError::render(e.to_string()))?;

    root.present()
        .map_err(|e| SurfaceError::render(e.to_string()))?;

    Ok(())
}

/// Axis range with 5% padding, widened when the span collapses
fn padded_range(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    if span <= f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let padding = span * 0.05;
    (min - padding, max + padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OptionType, Quote};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn surface() -> VolSurface {
        let quotes = vec![
            Quote::new(
                date(2024, 5, 1),
                date(2024, 6, 21),
                9000.0,
                OptionType::Call,
                120.0,
                18.0,
            ),
            Quote::new(
                date(2024, 5, 1),
                date(2024, 6, 21),
                9100.0,
                OptionType::Call,
                95.0,
                19.5,
            ),
            Quote::new(
                date(2024, 5, 1),
                date(2024, 9, 20),
                9000.0,
                OptionType::Call,
                180.0,
                21.0,
            ),
        ];
        VolSurface::from_quotes(&quotes).unwrap()
    }

    #[test]
    fn test_render_writes_svg_with_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smile.svg");

        render_smile_svg(&surface(), &path, "Volatility Surface - Call (2024-05-01)").unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Volatility Surface - Call (2024-05-01)"));
        assert!(svg.contains("2024-06-21"));
    }

    #[test]
    fn test_render_single_point_surface() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("single.svg");

        let quotes = vec![Quote::new(
            date(2024, 5, 1),
            date(2024, 6, 21),
            9000.0,
            OptionType::Put,
            80.0,
            17.0,
        )];
        let surface = VolSurface::from_quotes(&quotes).unwrap();

        render_smile_svg(&surface, &path, "single point").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_padded_range() {
        let (lo, hi) = padded_range(10.0, 20.0);
        assert!(lo < 10.0 && hi > 20.0);

        let (lo, hi) = padded_range(10.0, 10.0);
        assert!(lo < 10.0 && hi > 10.0);
    }
}
