//! Palette mapper - snaps sampled colours to the active palette.

use crate::types::{distance, Colour, Grid, Palette};

/// Find the palette entry closest to `colour` by redmean distance.
///
/// The scan keeps the first entry on ties. Returns `None` for an empty
/// palette.
pub fn nearest(colour: Colour, palette: &Palette) -> Option<Colour> {
    let mut best: Option<(Colour, f64)> = None;

    for &candidate in palette.colours() {
        let dist = distance(colour, candidate);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((candidate, dist)),
        }
    }

    best.map(|(c, _)| c)
}

/// Map every cell of a raw sampled grid onto `palette`.
///
/// With no palette (palette mode off) or an empty one the grid passes
/// through unchanged.
pub fn map_grid(grid: &Grid, palette: Option<&Palette>) -> Grid {
    match palette {
        Some(palette) if !palette.is_empty() => {
            grid.map(|c| nearest(c, palette).unwrap_or(c))
        }
        _ => grid.clone(),
    }
}
