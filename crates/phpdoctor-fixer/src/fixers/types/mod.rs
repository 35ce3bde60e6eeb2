//! Fixers comparing PHPDoc types against native declarations

mod no_superfluous_phpdoc_tags;

pub use no_superfluous_phpdoc_tags::NoSuperfluousPhpdocTagsFixer;
