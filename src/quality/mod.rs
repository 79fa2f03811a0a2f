//! Quality measurement of retrieval and answers

pub mod answer;
pub mod judgement;
pub mod retrieval;

pub use answer::{AnswerQuality, AnswerQualityService, Quality};
pub use judgement::{read_judgement_list, write_judgement_list, QuestionAnswerRecord};
pub use retrieval::{RetrievalQuality, RetrievalQualityService};
