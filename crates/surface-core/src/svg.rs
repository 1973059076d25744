//! SVG document emitter.
//!
//! Output is streamed to any `io::Write`: one root `<svg>` element with global
//! stroke/fill styling, then one `<polygon>` per cell in the order given.
use std::io::{self, Write};

use crate::color::Rgba;
use crate::projection::ScreenPoint;

pub const MIME_TYPE: &str = "image/svg+xml";

const SVG_STYLE: &str = "stroke: grey; fill: white; stroke-width: 0.7";

/// Decimal places for polygon coordinates.
const COORD_PRECISION: usize = 6;

/// Streaming writer for a surface document.
pub struct SvgWriter<W: Write> {
    out: W,
    polygons: usize,
}

impl<W: Write> SvgWriter<W> {
    /// Write the opening `<svg>` tag.
    pub fn begin(mut out: W, width: u32, height: u32) -> io::Result<Self> {
        write!(
            out,
            "<svg xmlns='http://www.w3.org/2000/svg' style='{SVG_STYLE}' width='{width}' height='{height}'>"
        )?;
        Ok(Self { out, polygons: 0 })
    }

    /// Write one quadrilateral. Coordinates are emitted as-is, even when they
    /// fall outside the canvas.
    pub fn polygon(&mut self, corners: &[ScreenPoint; 4], fill: Rgba) -> io::Result<()> {
        self.out.write_all(b"<polygon points='")?;
        for (k, p) in corners.iter().enumerate() {
            if k > 0 {
                self.out.write_all(b", ")?;
            }
            write!(
                self.out,
                "{:.prec$}, {:.prec$}",
                p.sx,
                p.sy,
                prec = COORD_PRECISION
            )?;
        }
        writeln!(self.out, "' fill='{fill}'/>")?;
        self.polygons += 1;
        Ok(())
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons
    }

    /// Close the root element and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.write_all(b"</svg>")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(sx: f64, sy: f64) -> ScreenPoint {
        ScreenPoint { sx, sy }
    }

    #[test]
    fn empty_document() {
        let w = SvgWriter::begin(Vec::new(), 600, 320).unwrap();
        let out = String::from_utf8(w.finish().unwrap()).unwrap();
        assert_eq!(
            out,
            "<svg xmlns='http://www.w3.org/2000/svg' \
             style='stroke: grey; fill: white; stroke-width: 0.7' \
             width='600' height='320'></svg>"
        );
    }

    #[test]
    fn polygon_has_eight_fixed_point_coords_and_hex_fill() {
        let mut w = SvgWriter::begin(Vec::new(), 10, 10).unwrap();
        let corners = [sp(1.0, 2.5), sp(-3.25, 4.0), sp(700.0, 0.125), sp(1.0 / 3.0, -0.5)];
        w.polygon(&corners, Rgba::opaque(255, 128, 0)).unwrap();
        assert_eq!(w.polygon_count(), 1);
        let out = String::from_utf8(w.finish().unwrap()).unwrap();

        let expected = "<polygon points='1.000000, 2.500000, -3.250000, 4.000000, \
                        700.000000, 0.125000, 0.333333, -0.500000' fill='#ff8000'/>\n";
        assert!(out.contains(expected), "unexpected polygon markup:\n{out}");
        assert!(out.ends_with("</svg>"));
    }
}
