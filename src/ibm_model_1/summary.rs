use crate::ibm_model_1::TrainedModel;
use crate::types::{BestTranslations, WordId};

// Position of the largest value; on ties the first one wins.
fn best_index(row: &[f64]) -> Option<WordId> {
    row.iter()
        .enumerate()
        .min_by(|(_, p1), (_, p2)| p2.total_cmp(p1))
        .map(|(f, _)| f)
}

/// Most probable source word for every target word, in target vocabulary
/// order. Ties go to the source word that came first in the corpus, which is
/// an artifact of the vocabulary order rather than a choice. Target words
/// with no source words at all are left out.
pub fn summarize(trained: &TrainedModel) -> BestTranslations {
    let target = &trained.vocabularies.target;
    let source = &trained.vocabularies.source;
    trained
        .probabilities
        .rows()
        .enumerate()
        .filter_map(|(e, row)| {
            best_index(row).map(|f| (target.word(e).to_owned(), source.word(f).to_owned()))
        })
        .collect()
}
