//! SVG rendering of a [`ModuleGrid`].
//!
//! Each grid row is scanned left to right and every maximal run of dark modules becomes one
//! `<rect>`. Runs are never merged across rows.

use crate::error::Result;
use crate::params::RasterParams;
use crate::qrcode::ModuleGrid;
use std::io::Write;

/// A maximal horizontal run of dark modules: `(start column, length)`.
pub type Run = (u32, u32);

/// Iterates the maximal runs of dark modules in row `y`, left to right.
pub fn dark_runs(grid: &ModuleGrid, y: u32) -> impl Iterator<Item = Run> + '_ {
    let row = grid.row(y);
    let mut x = 0u32;
    std::iter::from_fn(move || {
        let size = row.len() as u32;
        while x < size && !row[x as usize] {
            x += 1;
        }
        if x == size {
            return None;
        }
        let start = x;
        while x < size && row[x as usize] {
            x += 1;
        }
        Some((start, x - start))
    })
}

/// Returns a string of SVG code for an image depicting `grid`.
///
/// # Example
///
/// ```rust
/// use qiraster::{qrcode::ModuleGrid, params::RasterParams, svg::to_svg_string};
///
/// let grid = ModuleGrid::from_fn(21, |x, _| x < 3);
/// let svg = to_svg_string(&grid, &RasterParams::default()).unwrap();
/// assert!(svg.starts_with("<svg width=\"145\" height=\"145\""));
/// ```
pub fn to_svg_string(grid: &ModuleGrid, params: &RasterParams) -> Result<String> {
    let image_size = params.image_size(grid.size())?;
    let scale = params.scale();
    let padding = params.padding();

    let mut result = String::new();
    result += &format!(
        "<svg width=\"{0}\" height=\"{0}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        image_size
    );
    result += &format!(
        "  <rect x=\"0\" y=\"0\" width=\"{0}\" height=\"{0}\" fill=\"white\" />\n",
        image_size
    );
    for y in 0..grid.size() {
        for (start, len) in dark_runs(grid, y) {
            result += &format!(
                "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"black\" />\n",
                (start + padding) * scale,
                (y + padding) * scale,
                len * scale,
                scale
            );
        }
    }
    result += "</svg>\n";
    Ok(result)
}

/// Renders `grid` as SVG and writes the document to `writer`.
pub fn write_svg<W: Write>(grid: &ModuleGrid, params: &RasterParams, mut writer: W) -> Result<()> {
    let svg = to_svg_string(grid, params)?;
    writer.write_all(svg.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rects(svg: &str) -> Vec<(u32, u32, u32, u32)> {
        svg.lines()
            .filter(|l| l.contains("fill=\"black\""))
            .map(|l| {
                let attr = |name: &str| -> u32 {
                    let key = format!(" {}=\"", name);
                    let rest = &l[l.find(&key).unwrap() + key.len()..];
                    rest[..rest.find('"').unwrap()].parse().unwrap()
                };
                (attr("x"), attr("y"), attr("width"), attr("height"))
            })
            .collect()
    }

    #[test]
    fn test_runs() {
        let grid = ModuleGrid::new(
            5,
            [
                [true, true, false, true, false],
                [false; 5],
                [true; 5],
                [false, false, false, false, true],
                [false, true, false, true, false],
            ]
            .concat(),
        )
        .unwrap();
        assert_eq!(dark_runs(&grid, 0).collect::<Vec<_>>(), vec![(0, 2), (3, 1)]);
        assert_eq!(dark_runs(&grid, 1).count(), 0);
        assert_eq!(dark_runs(&grid, 2).collect::<Vec<_>>(), vec![(0, 5)]);
        assert_eq!(dark_runs(&grid, 3).collect::<Vec<_>>(), vec![(4, 1)]);
        assert_eq!(dark_runs(&grid, 4).collect::<Vec<_>>(), vec![(1, 1), (3, 1)]);
    }

    #[test]
    fn test_document_shape() {
        let grid = ModuleGrid::from_fn(21, |x, y| y == 0 && x < 7);
        let svg = to_svg_string(&grid, &RasterParams::default()).unwrap();
        let expected = "<svg width=\"145\" height=\"145\" xmlns=\"http://www.w3.org/2000/svg\">\n\
            \x20 <rect x=\"0\" y=\"0\" width=\"145\" height=\"145\" fill=\"white\" />\n\
            \x20 <rect x=\"20\" y=\"20\" width=\"35\" height=\"5\" fill=\"black\" />\n\
            </svg>\n";
        assert_eq!(svg, expected);
    }

    #[test]
    fn test_empty_rows_emit_nothing() {
        let grid = ModuleGrid::from_fn(21, |_, _| false);
        let svg = to_svg_string(&grid, &RasterParams::new(1, 0).unwrap()).unwrap();
        assert!(rects(&svg).is_empty());
        assert!(svg.starts_with("<svg width=\"21\" height=\"21\""));
    }

    #[test]
    fn test_write_svg_matches_string() {
        let grid = ModuleGrid::from_fn(21, |x, y| (x * y) % 3 == 0);
        let params = RasterParams::new(2, 1).unwrap();
        let mut sink = Vec::new();
        write_svg(&grid, &params, &mut sink).unwrap();
        assert_eq!(sink, to_svg_string(&grid, &params).unwrap().into_bytes());
    }

    proptest! {
        #[test]
        fn test_rects_cover_exactly_the_dark_modules(
            size in 1u32..25,
            scale in 1u32..6,
            padding in 0u32..5,
            bits in prop::collection::vec(any::<bool>(), 625),
        ) {
            let grid = ModuleGrid::from_fn(size, |x, y| bits[(y * size + x) as usize]);
            let params = RasterParams::new(scale, padding).unwrap();
            let svg = to_svg_string(&grid, &params).unwrap();
            let rects = rects(&svg);

            for y in 0..size {
                let row_y = (y + padding) * scale;
                let mut row: Vec<_> = rects.iter().filter(|r| r.1 == row_y).collect();
                row.sort();
                prop_assert_eq!(row.len(), dark_runs(&grid, y).count());

                let mut covered = vec![false; size as usize];
                for (i, &&(x, _, w, h)) in row.iter().enumerate() {
                    prop_assert_eq!(h, scale);
                    prop_assert_eq!(x % scale, 0);
                    prop_assert_eq!(w % scale, 0);
                    let start = x / scale - padding;
                    for m in start..start + w / scale {
                        covered[m as usize] = true;
                    }
                    if let Some(&&(next_x, ..)) = row.get(i + 1) {
                        // adjacent rectangles would have been one run
                        prop_assert!(x + w < next_x);
                    }
                }
                prop_assert_eq!(covered, grid.row(y).to_vec());
            }
        }
    }
}
