use std::mem;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, info, warn};

pub mod distance;
pub mod file;
pub mod summary;
pub mod table;

pub use self::distance::distance;
pub use self::table::ProbabilityModel;

use crate::config::TrainConfig;
use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::types::WordId;
use crate::vocabulary::Vocabularies;

// A sentence pair with its words replaced by vocabulary ids
struct IndexedPair {
    target: Vec<WordId>,
    source: Vec<WordId>,
}

// Per-iteration accumulators, zeroed before every pass
struct Buffers {
    counts: ProbabilityModel,
    totals: Vec<f64>,
    total_s: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Two successive models came closer than epsilon.
    Converged,
    /// The iteration cap was reached first.
    Exhausted,
}

/// Result of a training run. `probabilities` is indexed by the ids of
/// `vocabularies`.
#[derive(Clone, Debug)]
pub struct TrainedModel {
    pub vocabularies: Vocabularies,
    pub probabilities: ProbabilityModel,
    pub iterations: usize,
    // distance between the last two models
    pub distance: f64,
    pub outcome: Outcome,
}

impl TrainedModel {
    /// `p(e, f)` as stored in the table, None for unknown words.
    pub fn probability(&self, target: &str, source: &str) -> Option<f64> {
        let e = self.vocabularies.target.id(target)?;
        let f = self.vocabularies.source.id(source)?;
        Some(self.probabilities.get(e, f))
    }

    pub fn is_converged(&self) -> bool {
        self.outcome == Outcome::Converged
    }
}

/// IBM Model 1 trained by expectation maximization.
///
/// The table stores, for every target word `e` and source word `f`, the
/// share of `f`'s expected alignments that go to `e`. Each pass distributes
/// every target word occurrence over the source words of its sentence in
/// proportion to the current table (E-step), then renormalizes the collected
/// counts per source word (M-step).
pub struct IbmModel1 {
    vocabularies: Vocabularies,
    sentences: Vec<IndexedPair>,
    config: TrainConfig,
}

impl IbmModel1 {
    pub fn new(corpus: &Corpus, config: TrainConfig) -> IbmModel1 {
        let mut vocabularies = Vocabularies::default();
        let sentences = corpus
            .iter()
            .map(|pair| {
                let (target, source) = vocabularies.add(pair);
                IndexedPair { target, source }
            })
            .collect_vec();
        debug!(
            "{} target words, {} source words",
            vocabularies.target.len(),
            vocabularies.source.len()
        );
        IbmModel1 { vocabularies, sentences, config }
    }

    pub fn vocabularies(&self) -> &Vocabularies {
        &self.vocabularies
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    fn shape(&self) -> (usize, usize) {
        (self.vocabularies.target.len(), self.vocabularies.source.len())
    }

    pub fn initial_model(&self) -> ProbabilityModel {
        ProbabilityModel::uniform(&self.vocabularies.target, &self.vocabularies.source)
    }

    fn buffers(&self) -> Buffers {
        let (rows, cols) = self.shape();
        Buffers {
            counts: ProbabilityModel::zeroed(rows, cols),
            totals: vec![0.0; cols],
            total_s: vec![0.0; rows],
        }
    }

    /// One EM pass over the corpus. `current` is left untouched.
    pub fn train_iteration(&self, current: &ProbabilityModel) -> Result<ProbabilityModel> {
        let (rows, cols) = self.shape();
        if current.shape() != (rows, cols) {
            return Err(Error::ShapeMismatch { left: (rows, cols), right: current.shape() });
        }
        let mut buffers = self.buffers();
        let mut next = ProbabilityModel::zeroed(rows, cols);
        self.iterate(current, &mut buffers, &mut next)?;
        Ok(next)
    }

    // Writes every cell of `next`
    fn iterate(&self, current: &ProbabilityModel, buffers: &mut Buffers, next: &mut ProbabilityModel) -> Result<()> {
        let (rows, cols) = self.shape();
        buffers.counts.fill(0.0);
        buffers.totals.iter_mut().for_each(|t| *t = 0.0);

        // E-step
        for (n, pair) in self.sentences.iter().enumerate() {
            for &e in &pair.target {
                buffers.total_s[e] = pair.source.iter().map(|&f| current.get(e, f)).sum();
            }

            if pair.source.is_empty() {
                continue;
            }
            for &e in &pair.target {
                let total_s = buffers.total_s[e];
                if total_s == 0.0 {
                    return Err(Error::ZeroNormalizer {
                        word: self.vocabularies.target.word(e).to_owned(),
                        sentence: n,
                    });
                }
                for &f in &pair.source {
                    let c = current.get(e, f) / total_s;
                    buffers.counts.add(e, f, c);
                    buffers.totals[f] += c;
                }
            }
        }

        // M-step
        for f in 0..cols {
            let total = buffers.totals[f];
            if total == 0.0 && rows > 0 {
                return Err(Error::ZeroEvidence {
                    word: self.vocabularies.source.word(f).to_owned(),
                });
            }
            for e in 0..rows {
                next.set(e, f, buffers.counts.get(e, f) / total);
            }
        }
        Ok(())
    }

    fn log_distance(&self, iteration: usize, delta: f64) {
        if self.config.verbose {
            info!("Iteration {}: distance {}", iteration, delta);
        } else {
            debug!("Iteration {}: distance {}", iteration, delta);
        }
    }

    /// Iterates from the uniform model until two successive models are closer
    /// than `epsilon`, or until `max_iterations` passes have run.
    pub fn train(self) -> Result<TrainedModel> {
        let (rows, cols) = self.shape();
        info!("Training on {} sentence pairs ({} x {} table)", self.sentences.len(), rows, cols);
        let start = Instant::now();

        let mut previous = self.initial_model();
        let mut candidate = ProbabilityModel::zeroed(rows, cols);
        let mut buffers = self.buffers();
        let mut iterations = 0;
        let (outcome, delta) = loop {
            self.iterate(&previous, &mut buffers, &mut candidate)?;
            iterations += 1;

            let delta = distance(&previous, &candidate)?;
            self.log_distance(iterations, delta);
            if delta < self.config.epsilon {
                break (Outcome::Converged, delta);
            }
            if let Some(max_iterations) = self.config.max_iterations {
                if iterations >= max_iterations {
                    warn!(
                        "Stopped after {} iterations without converging (distance {}, epsilon {})",
                        iterations, delta, self.config.epsilon
                    );
                    break (Outcome::Exhausted, delta);
                }
            }
            mem::swap(&mut previous, &mut candidate);
        };

        info!("Performed {} iterations in {:?}", iterations, start.elapsed());
        Ok(TrainedModel {
            vocabularies: self.vocabularies,
            probabilities: candidate,
            iterations,
            distance: delta,
            outcome,
        })
    }
}

pub fn train_model(corpus: &Corpus, config: TrainConfig) -> Result<TrainedModel> {
    IbmModel1::new(corpus, config).train()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::SentencePair;

    fn corpus(pairs: &[(&str, &str)]) -> Corpus {
        pairs.iter().map(|(t, s)| SentencePair::new(t, s)).collect()
    }

    fn config(epsilon: f64, max_iterations: Option<usize>) -> TrainConfig {
        TrainConfig { epsilon, max_iterations, verbose: false }
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{} != {}", a, b);
    }

    #[test]
    fn first_iteration_spreads_counts_over_sentence() {
        let model = IbmModel1::new(&corpus(&[("the house", "la maison"), ("the dog", "le chien")]), TrainConfig::default());
        let initial = model.initial_model();
        let next = model.train_iteration(&initial).unwrap();

        let v = model.vocabularies();
        let p = |e: &str, f: &str| next.get(v.target.id(e).unwrap(), v.source.id(f).unwrap());
        assert_close(p("the", "la"), 0.5);
        assert_close(p("house", "la"), 0.5);
        assert_close(p("dog", "la"), 0.0);
        assert_close(p("dog", "chien"), 0.5);
        assert_close(p("house", "chien"), 0.0);
        // the input is left alone
        assert_eq!(initial, model.initial_model());
    }

    #[test]
    fn columns_sum_to_one_after_an_iteration() {
        let model = IbmModel1::new(
            &corpus(&[("the house", "das Haus"), ("the book", "das Buch"), ("a book", "ein Buch")]),
            TrainConfig::default(),
        );
        let mut current = model.initial_model();
        for _ in 0..3 {
            current = model.train_iteration(&current).unwrap();
            for f in 0..model.vocabularies().source.len() {
                assert_close(current.column(f).sum::<f64>(), 1.0);
            }
        }
    }

    #[test]
    fn repeated_words_count_once_per_occurrence() {
        let model = IbmModel1::new(&corpus(&[("a a b", "x y")]), TrainConfig::default());
        let next = model.train_iteration(&model.initial_model()).unwrap();
        // "a" holds two of the three target occurrences
        assert_close(next.get(0, 0), 2.0 / 3.0);
        assert_close(next.get(1, 0), 1.0 / 3.0);
    }

    #[test]
    fn fixed_point_is_reproduced() {
        let model = IbmModel1::new(&corpus(&[("a", "x"), ("b", "y")]), TrainConfig::default());
        let mut identity = ProbabilityModel::zeroed(2, 2);
        identity.set(0, 0, 1.0);
        identity.set(1, 1, 1.0);
        let next = model.train_iteration(&identity).unwrap();
        assert!(distance(&identity, &next).unwrap() < 1e-12);
    }

    #[test]
    fn train_iteration_rejects_foreign_model() {
        let model = IbmModel1::new(&corpus(&[("a", "x")]), TrainConfig::default());
        let err = model.train_iteration(&ProbabilityModel::zeroed(2, 2)).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn source_word_without_target_words_divides_by_zero() {
        let err = train_model(&corpus(&[("a", "x"), ("", "y")]), TrainConfig::default()).unwrap_err();
        assert!(matches!(err, Error::ZeroEvidence { ref word } if word == "y"));
    }

    #[test]
    fn zero_sentence_mass_divides_by_zero() {
        let model = IbmModel1::new(&corpus(&[("a", "x"), ("a", "y")]), TrainConfig::default());
        let mut current = ProbabilityModel::zeroed(1, 2);
        current.set(0, 0, 1.0);
        let err = model.train_iteration(&current).unwrap_err();
        assert!(matches!(err, Error::ZeroNormalizer { ref word, sentence: 1 } if word == "a"));
    }

    #[test]
    fn trivial_corpus_converges_in_two_iterations() {
        let trained = train_model(&corpus(&[("a", "x"), ("b", "y")]), config(0.01, None)).unwrap();
        assert_eq!(trained.outcome, Outcome::Converged);
        assert_eq!(trained.iterations, 2);
        assert_eq!(trained.distance, 0.0);
        assert_eq!(trained.probability("a", "x"), Some(1.0));
        assert_eq!(trained.probability("a", "y"), Some(0.0));
        assert_eq!(trained.probability("a", "z"), None);
    }

    #[test]
    fn iteration_cap_reports_exhaustion() {
        let trained = train_model(
            &corpus(&[("the house", "das Haus"), ("the book", "das Buch"), ("a book", "ein Buch")]),
            config(1e-12, Some(3)),
        )
        .unwrap();
        assert_eq!(trained.outcome, Outcome::Exhausted);
        assert!(!trained.is_converged());
        assert_eq!(trained.iterations, 3);
        assert!(trained.distance >= 1e-12);
    }

    #[test]
    fn empty_corpus_converges_immediately() {
        let trained = train_model(&Vec::new(), TrainConfig::default()).unwrap();
        assert!(trained.is_converged());
        assert_eq!(trained.iterations, 1);
        assert!(trained.probabilities.is_empty());
    }
}
