//! Resume-to-job matching engine.
//! Pure functions only: keyword extraction and similarity are the shared
//! primitives, five analyzers build on them, and `aggregate` combines the
//! analyzers into one bounded score.

pub mod aggregate;
pub mod description;
pub mod experience;
pub mod keywords;
pub mod quality;
pub mod role;
pub mod similarity;
pub mod skills;
pub mod vocabulary;
pub mod years;
