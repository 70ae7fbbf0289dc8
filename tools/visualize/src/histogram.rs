//! Histogram bar chart as an RGB image. No text; the caller prints titles.

use rf_core::{Histogram, HistogramStyle};

const MARGIN: u32 = 24;
const WHITE: image::Rgb<u8> = image::Rgb([255, 255, 255]);

/// Draw one bar per bin, heights scaled to the fullest bin, with edged bars
/// and an L-shaped axis.
pub fn render_histogram(hist: &Histogram, style: &HistogramStyle) -> image::RgbImage {
    let (w, h) = (style.width.max(2 * MARGIN + 1), style.height.max(2 * MARGIN + 1));
    let mut img = image::RgbImage::from_pixel(w, h, WHITE);
    let bar = image::Rgb(style.bar);
    let edge = image::Rgb(style.edge);

    let plot_w = w - 2 * MARGIN;
    let plot_h = h - 2 * MARGIN;
    let base_y = h - MARGIN; // first row below the plot
    let n = hist.counts.len().max(1) as u32;
    let peak = hist.counts.iter().copied().max().unwrap_or(0).max(1) as f64;

    for (i, &count) in hist.counts.iter().enumerate() {
        let x0 = MARGIN + plot_w * i as u32 / n;
        let x1 = MARGIN + plot_w * (i as u32 + 1) / n;
        let bar_h = ((count as f64 / peak) * plot_h as f64).round() as u32;
        if bar_h == 0 || x1 <= x0 {
            continue;
        }
        let top = base_y - bar_h;
        for y in top..base_y {
            for x in x0..x1 {
                let on_edge = x == x0 || x == x1 - 1 || y == top;
                img.put_pixel(x, y, if on_edge { edge } else { bar });
            }
        }
    }

    // Axes.
    for x in MARGIN..w - MARGIN {
        img.put_pixel(x, base_y, edge);
    }
    for y in MARGIN..=base_y {
        img.put_pixel(MARGIN - 1, y, edge);
    }
    img
}
