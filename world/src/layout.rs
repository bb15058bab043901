//! Text layout parsing for maze grids.

use maze_runner_core::TileKind;
use thiserror::Error;

/// Bundled 28x31 arcade maze.
///
/// Glyphs: `X` wall, `W` warp tunnel mouth, and any of ` `, `.`, `o`, `O`
/// for open floor (the dot glyphs mark pellets in the arcade game and are
/// plain floor here).
pub const CLASSIC_LAYOUT: &str = concat!(
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX\n",
    "XooooooooooooXXooooooooooooX\n",
    "XoXXXXoXXXXXoXXoXXXXXoXXXXoX\n",
    "XOXXXXoXXXXXoXXoXXXXXoXXXXOX\n",
    "XoXXXXoXXXXXoXXoXXXXXoXXXXoX\n",
    "XooooooooooooooooooooooooooX\n",
    "XoXXXXoXXoXXXXXXXXoXXoXXXXoX\n",
    "XoXXXXoXXoXXXXXXXXoXXoXXXXoX\n",
    "XooooooXXooooXXooooXXooooooX\n",
    "XXXXXXoXXXXX XX XXXXXoXXXXXX\n",
    "XXXXXXoXXXXX XX XXXXXoXXXXXX\n",
    "XXXXXXoXX          XXoXXXXXX\n",
    "XXXXXXoXX XXXXXXXX XXoXXXXXX\n",
    "XXXXXXoXX X      X XXoXXXXXX\n",
    "W     o   X      X   o     W\n",
    "XXXXXXoXX X      X XXoXXXXXX\n",
    "XXXXXXoXX XXXXXXXX XXoXXXXXX\n",
    "XXXXXXoXX          XXoXXXXXX\n",
    "XXXXXXoXX XXXXXXXX XXoXXXXXX\n",
    "XXXXXXoXX XXXXXXXX XXoXXXXXX\n",
    "XooooooooooooXXooooooooooooX\n",
    "XoXXXXoXXXXXoXXoXXXXXoXXXXoX\n",
    "XoXXXXoXXXXXoXXoXXXXXoXXXXoX\n",
    "XOooXXooooooo  oooooooXXooOX\n",
    "XXXoXXoXXoXXXXXXXXoXXoXXoXXX\n",
    "XXXoXXoXXoXXXXXXXXoXXoXXoXXX\n",
    "XooooooXXooooXXooooXXooooooX\n",
    "XoXXXXXXXXXXoXXoXXXXXXXXXXoX\n",
    "XoXXXXXXXXXXoXXoXXXXXXXXXXoX\n",
    "XooooooooooooooooooooooooooX\n",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX\n",
);

/// Errors that can occur while parsing a maze layout.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// The layout contained no rows.
    #[error("maze layout contains no rows")]
    Empty,
    /// A row's width differs from the first row's width.
    #[error("row {row} has {found} tiles but the first row has {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: u32,
        /// Width of the first row.
        expected: u32,
        /// Width of the offending row.
        found: u32,
    },
    /// A character outside the glyph set was encountered.
    #[error("unknown tile glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph {
        /// Character that failed to parse.
        glyph: char,
        /// Zero-based column of the glyph.
        column: u32,
        /// Zero-based row of the glyph.
        row: u32,
    },
    /// The layout does not fit the signed coordinate space.
    #[error("maze layout exceeds {limit} tiles along an axis")]
    TooLarge {
        /// Largest supported extent.
        limit: u32,
    },
}

const MAX_EXTENT: u32 = i32::MAX as u32 - 1;

pub(crate) fn parse(layout: &str) -> Result<(u32, u32, Vec<TileKind>), MazeError> {
    let lines: Vec<&str> = layout
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return Err(MazeError::Empty);
    };
    let rows = &lines[first..=last];

    let row_count = extent(rows.len())?;
    let column_count = extent(rows[0].chars().count())?;

    let mut tiles = Vec::with_capacity(rows.len() * rows[0].len());
    for (row_index, line) in (0u32..).zip(rows) {
        let width = extent(line.chars().count())?;
        if width != column_count {
            return Err(MazeError::RaggedRow {
                row: row_index,
                expected: column_count,
                found: width,
            });
        }
        for (column_index, glyph) in (0u32..).zip(line.chars()) {
            tiles.push(tile_for_glyph(glyph).ok_or(MazeError::UnknownGlyph {
                glyph,
                column: column_index,
                row: row_index,
            })?);
        }
    }

    Ok((column_count, row_count, tiles))
}

fn extent(count: usize) -> Result<u32, MazeError> {
    u32::try_from(count)
        .ok()
        .filter(|value| *value <= MAX_EXTENT)
        .ok_or(MazeError::TooLarge { limit: MAX_EXTENT })
}

fn tile_for_glyph(glyph: char) -> Option<TileKind> {
    match glyph {
        'X' => Some(TileKind::Wall),
        'W' => Some(TileKind::Warp),
        ' ' | '.' | 'o' | 'O' => Some(TileKind::Open),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_layout_rows_share_one_width() {
        let (columns, rows, tiles) = parse(CLASSIC_LAYOUT).expect("classic layout parses");
        assert_eq!((columns, rows), (28, 31));
        assert_eq!(tiles.len(), 28 * 31);
    }

    #[test]
    fn surrounding_blank_lines_are_ignored() {
        let (columns, rows, _) = parse("\n\nXX\r\n..\n\n").expect("layout parses");
        assert_eq!((columns, rows), (2, 2));
    }

    #[test]
    fn empty_layout_is_rejected() {
        assert_eq!(parse(""), Err(MazeError::Empty));
        assert_eq!(parse("\n\n"), Err(MazeError::Empty));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert_eq!(
            parse("XXX\nXX\n"),
            Err(MazeError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn unknown_glyphs_report_their_location() {
        let error = parse("XXX\nX#X\n").expect_err("glyph must be rejected");
        assert_eq!(
            error,
            MazeError::UnknownGlyph {
                glyph: '#',
                column: 1,
                row: 1,
            }
        );
        assert_eq!(
            error.to_string(),
            "unknown tile glyph '#' at column 1, row 1"
        );
    }
}
