//! Ordered entry collection with derived 2D grid addressing.
//!
//! The layout is a pure function of `(entry order, column count)` and is
//! recomputed on demand rather than cached, so it always reflects the current
//! container width.

use crate::{entry::Entry, ids::ItemId};

/// Ordered collection of grid entries plus the single-highlight state.
///
/// Entries are exclusively owned here; collaborators receive references only
/// for the duration of a call.
#[derive(Debug, Default)]
pub struct GridModel {
    entries: Vec<Entry>,
    highlight: Option<ItemId>,
}

/// Row/column placement of every entry for one column count.
///
/// Placement fills column 0 to capacity before advancing: entries are
/// appended to the current column's list, moving to the next column once the
/// list holds `ceil(n / columns)` entries. Column 0 therefore receives the
/// earliest entries and no column exceeds that capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    columns: usize,
    cells: Vec<Vec<usize>>,
    highlight: Option<(usize, usize)>,
}

impl GridModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the end of the ordered sequence.
    pub fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Empty the sequence and clear the highlight. Used when a fresh batch or
    /// a new search replaces the view.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.highlight = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Set the highlight to the entry with the given id. Setting an id not
    /// present in the grid is a silent no-op.
    pub fn highlight(&mut self, id: &ItemId) {
        if self.index_of(id).is_some() {
            self.highlight = Some(id.clone());
        }
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    pub fn highlighted(&self) -> Option<&Entry> {
        let id = self.highlight.as_ref()?;
        self.index_of(id).and_then(|i| self.entries.get(i))
    }

    /// Ordinal position of the highlighted entry, if any.
    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlight.as_ref().and_then(|id| self.index_of(id))
    }

    /// Derive the grid placement for the given column count.
    pub fn compute_grid(&self, columns: usize) -> GridLayout {
        GridLayout::build(self.entries.len(), columns, self.highlighted_index())
    }

    fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }
}

impl GridLayout {
    fn build(n: usize, columns: usize, highlight_index: Option<usize>) -> Self {
        if columns == 0 || n == 0 {
            return Self {
                columns,
                cells: Vec::new(),
                highlight: None,
            };
        }

        let capacity = n.div_ceil(columns);
        let mut cells: Vec<Vec<usize>> = Vec::new();
        for index in 0..n {
            if cells.last().map_or(true, |col| col.len() >= capacity) {
                cells.push(Vec::with_capacity(capacity));
            }
            if let Some(col) = cells.last_mut() {
                col.push(index);
            }
        }

        let highlight = highlight_index.and_then(|i| Self::locate(&cells, i));
        Self {
            columns,
            cells,
            highlight,
        }
    }

    /// Column count this layout was derived for.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Entry index at the given address, if the cell is occupied.
    pub fn entry_at(&self, row: usize, col: usize) -> Option<usize> {
        self.cells.get(col)?.get(row).copied()
    }

    /// `(row, col)` address of the given entry index.
    pub fn position_of(&self, index: usize) -> Option<(usize, usize)> {
        Self::locate(&self.cells, index)
    }

    /// `(row, col)` of the highlighted entry, if any.
    pub fn highlight_position(&self) -> Option<(usize, usize)> {
        self.highlight
    }

    fn locate(cells: &[Vec<usize>], index: usize) -> Option<(usize, usize)> {
        for (col, list) in cells.iter().enumerate() {
            if let Some(row) = list.iter().position(|&i| i == index) {
                return Some((row, col));
            }
        }
        None
    }
}
