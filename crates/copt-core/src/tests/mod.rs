mod charmap_coverage;
mod scenarios;

use crate::translit::Transliterator;

pub(super) fn t(text: &str) -> String {
    Transliterator::global().translit(text)
}
