pub mod matching;
pub mod profile;
