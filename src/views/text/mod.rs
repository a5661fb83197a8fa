//! Text tools

mod case_converter;
mod diff;
mod password;
mod word_count;

pub use case_converter::CaseConverter;
pub use diff::TextDiff;
pub use password::PasswordGenerator;
pub use word_count::WordCount;
