use std::fmt;

const WORD_BITS: usize = u64::BITS as usize;

/// Square boolean relation on `size` elements stored as packed bit rows.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Relation {
    size: usize,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Relation {
    /// Creates the empty relation.
    pub fn empty(size: usize) -> Self {
        let words_per_row = size.div_ceil(WORD_BITS);
        Self {
            size,
            words_per_row,
            bits: vec![0; words_per_row * size],
        }
    }

    /// Creates the identity relation.
    pub fn identity(size: usize) -> Self {
        Self::from_fn(size, |i, j| i == j)
    }

    /// Creates a relation holding exactly the pairs for which `f` returns true.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut relation = Self::empty(size);
        for i in 0..size {
            for j in 0..size {
                if f(i, j) {
                    relation.insert(i, j);
                }
            }
        }
        relation
    }

    /// Number of elements the relation ranges over.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns whether `(i, j)` belongs to the relation.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn contains(&self, i: usize, j: usize) -> bool {
        let (word, mask) = self.locate(i, j);
        self.bits[word] & mask != 0
    }

    /// Adds `(i, j)`.
    pub fn insert(&mut self, i: usize, j: usize) {
        let (word, mask) = self.locate(i, j);
        self.bits[word] |= mask;
    }

    /// Removes `(i, j)`.
    pub fn remove(&mut self, i: usize, j: usize) {
        let (word, mask) = self.locate(i, j);
        self.bits[word] &= !mask;
    }

    /// Number of pairs in the relation.
    pub fn len(&self) -> usize {
        self.bits.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Returns whether the relation holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|word| *word == 0)
    }

    /// Iterates over every `j` with `(i, j)` in the relation, in increasing order.
    pub fn successors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        let size = self.size;
        self.row(i)
            .iter()
            .enumerate()
            .flat_map(move |(index, &word)| {
                (0..WORD_BITS)
                    .filter(move |bit| word & (1u64 << bit) != 0)
                    .map(move |bit| index * WORD_BITS + bit)
            })
            .filter(move |&j| j < size)
    }

    /// Iterates over all pairs in row-major order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |i| self.successors(i).map(move |j| (i, j)))
    }

    /// Returns the converse relation `{(j, i) | (i, j) ∈ self}`.
    pub fn transpose(&self) -> Self {
        let mut transposed = Self::empty(self.size);
        for (i, j) in self.pairs() {
            transposed.insert(j, i);
        }
        transposed
    }

    /// Dense row-major rendering, used for JSON output.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.size)
            .map(|i| (0..self.size).map(|j| self.contains(i, j)).collect())
            .collect()
    }

    /// Replaces row `target` with its union with row `source`.
    pub(crate) fn union_rows(&mut self, target: usize, source: usize) {
        if target == source {
            return;
        }
        let width = self.words_per_row;
        let source_row: Vec<u64> = self.row(source).to_vec();
        let start = target * width;
        for (word, extra) in self.bits[start..start + width].iter_mut().zip(source_row) {
            *word |= extra;
        }
    }

    fn row(&self, i: usize) -> &[u64] {
        assert!(i < self.size, "row {i} out of range for relation of size {}", self.size);
        let start = i * self.words_per_row;
        &self.bits[start..start + self.words_per_row]
    }

    fn locate(&self, i: usize, j: usize) -> (usize, u64) {
        assert!(
            i < self.size && j < self.size,
            "pair ({i}, {j}) out of range for relation of size {}",
            self.size
        );
        let word = i * self.words_per_row + j / WORD_BITS;
        (word, 1u64 << (j % WORD_BITS))
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("size", &self.size)
            .field("pairs", &self.pairs().collect::<Vec<_>>())
            .finish()
    }
}
