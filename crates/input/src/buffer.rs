//! Answer entry buffer.
//!
//! Digits only, capped at [`MAX_ANSWER_DIGITS`]. Backed by an `ArrayString`
//! so typing never allocates.

use arrayvec::ArrayString;

use crate::types::MAX_ANSWER_DIGITS;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerBuffer {
    text: ArrayString<MAX_ANSWER_DIGITS>,
}

impl AnswerBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one decimal digit. Returns false if the buffer is full or the
    /// value is not a digit.
    pub fn push_digit(&mut self, digit: u8) -> bool {
        if digit > 9 {
            return false;
        }
        self.text.try_push((b'0' + digit) as char).is_ok()
    }

    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Return the buffer contents and clear it.
    pub fn take(&mut self) -> ArrayString<MAX_ANSWER_DIGITS> {
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.text.is_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_accumulate_and_take_clears() {
        let mut b = AnswerBuffer::new();
        assert!(b.push_digit(4));
        assert!(b.push_digit(2));
        assert_eq!(b.as_str(), "42");

        let taken = b.take();
        assert_eq!(taken.as_str(), "42");
        assert!(b.is_empty());
    }

    #[test]
    fn rejects_non_digits_and_overflow() {
        let mut b = AnswerBuffer::new();
        assert!(!b.push_digit(10));
        for _ in 0..MAX_ANSWER_DIGITS {
            assert!(b.push_digit(9));
        }
        assert!(b.is_full());
        assert!(!b.push_digit(1));
        assert_eq!(b.as_str().len(), MAX_ANSWER_DIGITS);
    }

    #[test]
    fn backspace_removes_last_digit() {
        let mut b = AnswerBuffer::new();
        assert!(!b.backspace());
        b.push_digit(1);
        b.push_digit(2);
        assert!(b.backspace());
        assert_eq!(b.as_str(), "1");
    }
}
