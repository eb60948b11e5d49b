//! Set membership for the cells of one grid row, as needed by Eller's algorithm.
//!
//! Columns carry a set label. Merging relabels one whole set, which is linear in the row width and
//! keeps `isolate` trivial: a column leaving its set takes a label nobody else is using.

#[derive(Debug, Clone)]
pub struct RowSets {
    labels: Vec<usize>,
    sizes: Vec<usize>,
    free_labels: Vec<usize>,
}

impl RowSets {
    /// Every column starts in a set of its own.
    pub fn new(columns_count: usize) -> RowSets {
        RowSets {
            labels: (0..columns_count).collect(),
            sizes: vec![1; columns_count],
            free_labels: Vec::with_capacity(columns_count),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn same_set(&self, a: usize, b: usize) -> bool {
        self.labels[a] == self.labels[b]
    }

    #[inline]
    pub fn is_singleton(&self, column: usize) -> bool {
        self.sizes[self.labels[column]] == 1
    }

    pub fn sets_count(&self) -> usize {
        self.len() - self.free_labels.len()
    }

    /// Join the sets of `a` and `b`. Returns false if they were already one set.
    pub fn merge(&mut self, a: usize, b: usize) -> bool {
        let keep = self.labels[a];
        let retire = self.labels[b];
        if keep == retire {
            return false;
        }

        for label in self.labels.iter_mut().filter(|label| **label == retire) {
            *label = keep;
        }
        self.sizes[keep] += self.sizes[retire];
        self.sizes[retire] = 0;
        self.free_labels.push(retire);
        true
    }

    /// Move `column` out of its set into a new set of its own.
    pub fn isolate(&mut self, column: usize) {
        if self.is_singleton(column) {
            return;
        }
        // A set with two or more members means fewer sets than columns, so a label is free.
        let fresh = self.free_labels.pop().unwrap_or_else(|| {
            debug_assert!(false, "shared set of column {} with no free label", column);
            self.sizes.push(0);
            self.sizes.len() - 1
        });
        self.sizes[self.labels[column]] -= 1;
        self.sizes[fresh] = 1;
        self.labels[column] = fresh;
    }
}
