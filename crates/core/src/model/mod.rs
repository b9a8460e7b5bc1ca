mod dispensed;
mod ids;
mod question;
mod set;

pub use dispensed::DispensedQuestion;
pub use ids::QuestionId;
pub use question::{QuestionError, QuestionRecord};
pub use set::QuestionSet;
