use std::{mem::size_of, ops::Range};

/// The fixed width signed integer used for stack values and data space words.
pub type Cell = i64;

/// Width of a cell in bytes.  Alignment, `cell`, `!` and `@` all use this same width.
pub const CELL_SIZE: usize = size_of::<Cell>();

/// How many cells worth of capacity the arena reserves up front.
const RESERVED_CELLS: usize = 1024;

/// The data space is a flat, growable arena of bytes addressed by offset.  It starts logically
/// empty, grows by appending zero bytes and shrinks by truncating its tail.  It is never
/// compacted.
///
/// Cells are stored as little endian byte runs at any byte offset; there is no alignment
/// requirement on access, `align` only exists so scripts can lay out their variables neatly.
pub struct DataSpace {
    bytes: Vec<u8>,
}

impl Default for DataSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSpace {
    /// Create an empty arena with its initial capacity reserved.
    pub fn new() -> DataSpace {
        DataSpace {
            bytes: Vec::with_capacity(RESERVED_CELLS * CELL_SIZE),
        }
    }

    /// The current size of the arena, which is also the next free address.
    pub fn here(&self) -> usize {
        self.bytes.len()
    }

    /// Grow the arena by `count` zero bytes, or shrink it when `count` is negative.  Shrinking
    /// past empty, or growing by more than can be allocated, leaves the arena untouched and returns
    /// None.
    pub fn allot(&mut self, count: Cell) -> Option<()> {
        if count >= 0 {
            let grow = usize::try_from(count).ok()?;
            let new_size = self.bytes.len().checked_add(grow)?;

            self.bytes.try_reserve(grow).ok()?;
            self.bytes.resize(new_size, 0);
        } else {
            let shrink = usize::try_from(count.unsigned_abs()).ok()?;
            let new_size = self.bytes.len().checked_sub(shrink)?;
            self.bytes.truncate(new_size);
        }

        Some(())
    }

    /// The smallest multiple of the cell width that is not below the current size.
    pub fn next_aligned(&self) -> usize {
        let here = self.here();

        match here % CELL_SIZE {
            0 => here,
            diff => here + (CELL_SIZE - diff),
        }
    }

    /// Is the current size a multiple of the cell width?
    pub fn is_aligned(&self) -> bool {
        self.here() % CELL_SIZE == 0
    }

    /// Pad the arena with zero bytes up to the next cell boundary.
    pub fn align(&mut self) {
        if !self.is_aligned() {
            let aligned = self.next_aligned();
            self.bytes.resize(aligned, 0);
        }
    }

    /// Read the cell stored at the given address.  The whole cell has to lie inside the arena.
    pub fn read_cell(&self, address: Cell) -> Option<Cell> {
        let range = self.cell_range(address)?;
        let mut raw = [0u8; CELL_SIZE];

        raw.copy_from_slice(&self.bytes[range]);
        Some(Cell::from_le_bytes(raw))
    }

    /// Write a cell at the given address.  The whole cell has to lie inside the arena, otherwise
    /// nothing is written and None is returned.
    pub fn write_cell(&mut self, address: Cell, value: Cell) -> Option<()> {
        let range = self.cell_range(address)?;

        self.bytes[range].copy_from_slice(&value.to_le_bytes());
        Some(())
    }

    fn cell_range(&self, address: Cell) -> Option<Range<usize>> {
        let start = usize::try_from(address).ok()?;
        let end = start.checked_add(CELL_SIZE)?;

        if end > self.bytes.len() {
            return None;
        }

        Some(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let space = DataSpace::new();

        assert_eq!(space.here(), 0);
        assert!(space.is_aligned());
        assert_eq!(space.read_cell(0), None);
    }

    #[test]
    fn allot_grows_with_zeroes_and_shrinks() {
        let mut space = DataSpace::new();

        assert_eq!(space.allot(16), Some(()));
        assert_eq!(space.here(), 16);
        assert_eq!(space.read_cell(8), Some(0));

        assert_eq!(space.allot(-10), Some(()));
        assert_eq!(space.here(), 6);
    }

    #[test]
    fn shrinking_past_empty_fails_without_change() {
        let mut space = DataSpace::new();
        let _ = space.allot(4);

        assert_eq!(space.allot(-5), None);
        assert_eq!(space.here(), 4);
    }

    #[test]
    fn allot_beyond_memory_fails_without_change() {
        let mut space = DataSpace::new();
        let _ = space.allot(3);

        assert_eq!(space.allot(Cell::MAX), None);
        assert_eq!(space.here(), 3);
        assert!(!space.is_aligned());
    }

    #[test]
    fn align_pads_to_cell_width() {
        let mut space = DataSpace::new();
        let _ = space.allot(1);

        assert_eq!(space.next_aligned(), CELL_SIZE);
        assert_eq!(space.here(), 1);

        space.align();
        assert_eq!(space.here(), CELL_SIZE);

        space.align();
        assert_eq!(space.here(), CELL_SIZE);
    }

    #[test]
    fn cells_round_trip_at_unaligned_offsets() {
        let mut space = DataSpace::new();
        let _ = space.allot(3 + CELL_SIZE as Cell);

        assert_eq!(space.write_cell(3, -123_456_789), Some(()));
        assert_eq!(space.read_cell(3), Some(-123_456_789));
    }

    #[test]
    fn cell_access_must_fit_entirely() {
        let mut space = DataSpace::new();
        let _ = space.allot(CELL_SIZE as Cell + 2);

        assert_eq!(space.write_cell(2, 1), Some(()));
        assert_eq!(space.write_cell(3, 1), None);
        assert_eq!(space.read_cell(3), None);
        assert_eq!(space.read_cell(-1), None);
        assert_eq!(space.read_cell(Cell::MAX), None);
    }
}
