#![forbid(unsafe_code)]

pub mod model;
pub mod normalize;

pub use model::{DispensedQuestion, QuestionError, QuestionId, QuestionRecord, QuestionSet};
pub use normalize::{answers_match, normalize_answer};
