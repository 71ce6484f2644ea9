use crate::types::WordId;
use crate::vocabulary::Vocabulary;

/// Dense |target| x |source| probability table, row-major by target word.
///
/// Cells are addressed by the ids of the two vocabularies the table was built
/// from. The shape never changes after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityModel {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl ProbabilityModel {
    pub fn filled(rows: usize, cols: usize, value: f64) -> ProbabilityModel {
        ProbabilityModel { rows, cols, cells: vec![value; rows * cols] }
    }

    pub fn zeroed(rows: usize, cols: usize) -> ProbabilityModel {
        ProbabilityModel::filled(rows, cols, 0.0)
    }

    /// Every cell set to `1 / |target|`. No cell exists (and nothing is
    /// divided) when the target vocabulary is empty.
    pub fn uniform(target: &Vocabulary, source: &Vocabulary) -> ProbabilityModel {
        if target.is_empty() {
            return ProbabilityModel::zeroed(0, source.len());
        }
        ProbabilityModel::filled(target.len(), source.len(), 1.0 / target.len() as f64)
    }

    /// (target words, source words)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn offset(&self, e: WordId, f: WordId) -> usize {
        debug_assert!(e < self.rows && f < self.cols);
        e * self.cols + f
    }

    #[inline]
    pub fn get(&self, e: WordId, f: WordId) -> f64 {
        self.cells[self.offset(e, f)]
    }

    #[inline]
    pub fn set(&mut self, e: WordId, f: WordId, p: f64) {
        let i = self.offset(e, f);
        self.cells[i] = p;
    }

    #[inline]
    pub fn add(&mut self, e: WordId, f: WordId, p: f64) {
        let i = self.offset(e, f);
        self.cells[i] += p;
    }

    pub fn fill(&mut self, value: f64) {
        self.cells.iter_mut().for_each(|c| *c = value);
    }

    pub fn row(&self, e: WordId) -> &[f64] {
        &self.cells[e * self.cols..(e + 1) * self.cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |e| self.row(e))
    }

    pub fn column(&self, f: WordId) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows).map(move |e| self.get(e, f))
    }

    /// All cells, target-major, in vocabulary order.
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }
}
