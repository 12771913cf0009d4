#![no_std] // Usable from embedded/WASM hosts that only need the value types

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod lexicon;
pub mod token;

// Re-export core types for convenience
pub use lexicon::{Lexicon, SuffixRule, WordForm};
pub use token::{Span, Token};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use rkyv::{from_bytes, to_bytes};

    #[test]
    fn test_lexicon_serialization() {
        let original = Lexicon {
            language: "ru".to_string(),
            version: 3,
            forms: vec![WordForm::new("апельсины", "апельсин")],
            rules: vec![SuffixRule::new("ами", "а", 2)],
        };

        let bytes = to_bytes::<_, 256>(&original).expect("Failed to serialize Lexicon");

        // Deserialize (Simulate loading a compiled lexicon from disk)
        let deserialized: Lexicon = from_bytes(&bytes).expect("Failed to deserialize Lexicon");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_span_layout() {
        // Two usize offsets, nothing else
        assert_eq!(core::mem::size_of::<Span>(), 2 * core::mem::size_of::<usize>());
    }
}
