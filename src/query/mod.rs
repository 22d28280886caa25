pub mod scorer;

pub use scorer::{ScoreContext, Scorer, SearchHit};
