//! Text normalization: cleaning, tokenization, stopword filtering and
//! sentence segmentation shared by every extraction method.

mod processor;
mod stopwords;

pub use processor::{TextProcessor, all_ngrams, clean, frequency, ngrams, normalize_scores, sentences};
pub use stopwords::StopwordSet;
