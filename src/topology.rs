//! This module contains the fixed topology of the 9x9 grid: the three unit
//! families (rows, columns, and blocks), the peer relation, and the block
//! segments and bands used by the line/box interaction techniques. All
//! tables are computed once on first use and immutable thereafter; there are
//! no error conditions.

use crate::{BLOCK_SIZE, Cell, CELL_COUNT, GRID_SIZE};

use std::sync::OnceLock;

/// The number of peers of each cell: the 20 other cells sharing a row,
/// column, or block with it.
pub const PEER_COUNT: usize = 20;

/// The number of units in total: 9 blocks, 9 rows, and 9 columns.
pub const UNIT_COUNT: usize = 3 * GRID_SIZE;

struct Tables {
    rows: [[Cell; GRID_SIZE]; GRID_SIZE],
    columns: [[Cell; GRID_SIZE]; GRID_SIZE],
    blocks: [[Cell; GRID_SIZE]; GRID_SIZE],
    peers: [[Cell; PEER_COUNT]; CELL_COUNT],
    row_segments: [[[Cell; BLOCK_SIZE]; BLOCK_SIZE]; GRID_SIZE],
    column_segments: [[[Cell; BLOCK_SIZE]; BLOCK_SIZE]; GRID_SIZE]
}

fn build_tables() -> Tables {
    let placeholder = Cell::from_index_unchecked(0);
    let mut rows = [[placeholder; GRID_SIZE]; GRID_SIZE];
    let mut columns = [[placeholder; GRID_SIZE]; GRID_SIZE];
    let mut blocks = [[placeholder; GRID_SIZE]; GRID_SIZE];
    let mut block_len = [0usize; GRID_SIZE];

    for cell in Cell::all() {
        rows[cell.row()][cell.column()] = cell;
        columns[cell.column()][cell.row()] = cell;

        let block = cell.block();
        blocks[block][block_len[block]] = cell;
        block_len[block] += 1;
    }

    let mut peers = [[placeholder; PEER_COUNT]; CELL_COUNT];

    for cell in Cell::all() {
        let mut len = 0;

        for other in Cell::all() {
            if other != cell && (other.row() == cell.row() ||
                    other.column() == cell.column() ||
                    other.block() == cell.block()) {
                peers[cell.index()][len] = other;
                len += 1;
            }
        }

        debug_assert!(len == PEER_COUNT);
    }

    let mut row_segments =
        [[[placeholder; BLOCK_SIZE]; BLOCK_SIZE]; GRID_SIZE];
    let mut column_segments =
        [[[placeholder; BLOCK_SIZE]; BLOCK_SIZE]; GRID_SIZE];

    for block in 0..GRID_SIZE {
        for segment in 0..BLOCK_SIZE {
            for offset in 0..BLOCK_SIZE {
                // Cells of a block are enumerated row-major, so the cells of
                // its `segment`-th row are contiguous and the cells of its
                // `segment`-th column are strided.
                row_segments[block][segment][offset] =
                    blocks[block][segment * BLOCK_SIZE + offset];
                column_segments[block][segment][offset] =
                    blocks[block][offset * BLOCK_SIZE + segment];
            }
        }
    }

    Tables {
        rows,
        columns,
        blocks,
        peers,
        row_segments,
        column_segments
    }
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(build_tables)
}

/// Gets the 9 rows of the grid in top-to-bottom order. The cells within each
/// row are ordered left to right.
pub fn rows() -> &'static [[Cell; GRID_SIZE]; GRID_SIZE] {
    &tables().rows
}

/// Gets the 9 columns of the grid in left-to-right order. The cells within
/// each column are ordered top to bottom.
pub fn columns() -> &'static [[Cell; GRID_SIZE]; GRID_SIZE] {
    &tables().columns
}

/// Gets the 9 blocks of the grid in row-major order. The cells within each
/// block are ordered row-major as well.
pub fn blocks() -> &'static [[Cell; GRID_SIZE]; GRID_SIZE] {
    &tables().blocks
}

/// Returns an iterator over all 27 units in the canonical scan order of the
/// techniques: blocks first, then rows, then columns, each family in its
/// fixed enumeration order. This order determines which discovery is found
/// first and therefore must stay stable for reproducible difficulty scores.
pub fn all_units() -> impl Iterator<Item = &'static [Cell; GRID_SIZE]> {
    blocks().iter().chain(rows().iter()).chain(columns().iter())
}

/// Gets the peers of the given cell: the 20 other cells that share a row,
/// column, or block with it. The peer relation is symmetric and never
/// contains the cell itself.
pub fn peers(cell: Cell) -> &'static [Cell; PEER_COUNT] {
    &tables().peers[cell.index()]
}

/// Gets the cells of the given block that lie in its `segment`-th row
/// (0 to 2, top to bottom). Together with [column_segment], this carves each
/// block into the row and column thirds inspected by the line/box
/// interaction techniques.
pub fn row_segment(block: usize, segment: usize) -> &'static [Cell; BLOCK_SIZE] {
    &tables().row_segments[block][segment]
}

/// Gets the cells of the given block that lie in its `segment`-th column
/// (0 to 2, left to right).
pub fn column_segment(block: usize, segment: usize)
        -> &'static [Cell; BLOCK_SIZE] {
    &tables().column_segments[block][segment]
}

/// Gets the indices of the three blocks forming the given horizontal band
/// (0 to 2, top to bottom). Blocks in a band share their three rows.
pub fn row_band(band: usize) -> [usize; BLOCK_SIZE] {
    [band * BLOCK_SIZE, band * BLOCK_SIZE + 1, band * BLOCK_SIZE + 2]
}

/// Gets the indices of the three blocks forming the given vertical band
/// (0 to 2, left to right). Blocks in a band share their three columns.
pub fn column_band(band: usize) -> [usize; BLOCK_SIZE] {
    [band, band + BLOCK_SIZE, band + 2 * BLOCK_SIZE]
}

#[cfg(test)]
mod tests {

    use super::*;

    use std::collections::HashSet;

    #[test]
    fn every_cell_in_one_unit_per_family() {
        for cell in Cell::all() {
            assert_eq!(1, rows().iter()
                .filter(|unit| unit.contains(&cell))
                .count());
            assert_eq!(1, columns().iter()
                .filter(|unit| unit.contains(&cell))
                .count());
            assert_eq!(1, blocks().iter()
                .filter(|unit| unit.contains(&cell))
                .count());
        }
    }

    #[test]
    fn unit_scan_order_is_blocks_rows_columns() {
        let units: Vec<&[Cell; GRID_SIZE]> = all_units().collect();

        assert_eq!(UNIT_COUNT, units.len());
        assert_eq!(&blocks()[0], units[0]);
        assert_eq!(&rows()[0], units[9]);
        assert_eq!(&columns()[8], units[26]);
    }

    #[test]
    fn peers_are_symmetric_and_irreflexive() {
        for cell in Cell::all() {
            let cell_peers = peers(cell);

            assert_eq!(PEER_COUNT, cell_peers.len());
            assert!(!cell_peers.contains(&cell));

            for &peer in cell_peers {
                assert!(peers(peer).contains(&cell));
            }
        }
    }

    #[test]
    fn peers_cover_row_column_and_block() {
        let cell = Cell::at(4, 4).unwrap();
        let cell_peers: HashSet<Cell> = peers(cell).iter().cloned().collect();

        assert_eq!(PEER_COUNT, cell_peers.len());

        for &peer in &cell_peers {
            assert!(peer.row() == cell.row() ||
                peer.column() == cell.column() ||
                peer.block() == cell.block());
        }
    }

    #[test]
    fn segments_partition_each_block() {
        for block in 0..GRID_SIZE {
            let mut row_cells = HashSet::new();
            let mut column_cells = HashSet::new();

            for segment in 0..BLOCK_SIZE {
                row_cells.extend(row_segment(block, segment).iter().cloned());
                column_cells
                    .extend(column_segment(block, segment).iter().cloned());
            }

            let block_cells: HashSet<Cell> =
                blocks()[block].iter().cloned().collect();

            assert_eq!(block_cells, row_cells);
            assert_eq!(block_cells, column_cells);
        }
    }

    #[test]
    fn row_segment_cells_share_a_row() {
        for block in 0..GRID_SIZE {
            for segment in 0..BLOCK_SIZE {
                let cells = row_segment(block, segment);
                assert!(cells.iter().all(|c| c.row() == cells[0].row()));
            }
        }
    }

    #[test]
    fn bands_group_aligned_blocks() {
        assert_eq!([0, 1, 2], row_band(0));
        assert_eq!([6, 7, 8], row_band(2));
        assert_eq!([0, 3, 6], column_band(0));
        assert_eq!([2, 5, 8], column_band(2));
    }
}
