//! The machine word: the sole value type the VM manipulates.

/// A machine word. Doubles as arithmetic operand, boolean (zero is
/// false, non-zero is true), and jump target.
pub type Word = i64;

/// Convert a boolean into the word the comparison opcodes push.
pub fn word_from_bool(b: bool) -> Word {
    if b {
        1
    } else {
        0
    }
}

/// Boolean reading of a word, as used by JUMP_IF_TRUE.
pub fn word_is_true(w: Word) -> bool {
    w != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_conversion() {
        assert_eq!(word_from_bool(true), 1);
        assert_eq!(word_from_bool(false), 0);
    }

    #[test]
    fn truthiness_is_nonzero() {
        assert!(word_is_true(1));
        assert!(word_is_true(-1));
        assert!(word_is_true(Word::MAX));
        assert!(!word_is_true(0));
    }
}
