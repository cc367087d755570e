//! Rule-based transliteration of Coptic script into Latin pronunciation
//! spellings, with an optional hook for an external enhancement service.

pub mod charmap;
pub mod enhance;
pub mod pipeline;
pub mod rules;
pub mod settings;
pub mod translit;
pub mod unicode;

#[cfg(test)]
mod tests;

pub use enhance::{EnhanceError, EnhanceRequest, Enhancer};
pub use pipeline::{Method, Mode, TransliterationResult};
pub use translit::{translit, Transliterator};
