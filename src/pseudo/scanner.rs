//! Left-to-right character scanner.

/// Cursor over the characters of a string.
#[derive(Debug)]
pub(super) struct Scanner {
    /// Decoded characters.
    chars: Vec<char>,
    /// Current position.
    pos: usize,
}

impl Scanner {
    /// Starts at the beginning of `text`.
    pub(super) fn new(text: &str) -> Self {
        Self { chars: text.chars().collect(), pos: 0 }
    }

    /// Character `offset` positions ahead.
    pub(super) fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// `true` when the next characters are `prefix`.
    pub(super) fn starts_with(&self, prefix: &str) -> bool {
        prefix.chars().enumerate().all(|(i, c)| self.peek(i) == Some(c))
    }

    /// Consumes one character.
    pub(super) fn bump(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.pos += 1;
        Some(c)
    }

    /// Copies up to `n` characters.
    pub(super) fn copy_n(&mut self, out: &mut String, n: usize) {
        for _ in 0..n {
            match self.bump() {
                Some(c) => out.push(c),
                None => break,
            }
        }
    }

    /// Copies characters until `stop` returns true for the upcoming one.
    /// The stopping character is not consumed.
    pub(super) fn copy_until(&mut self, out: &mut String, mut stop: impl FnMut(&Self) -> bool) {
        while self.peek(0).is_some() && !stop(self) {
            self.copy_n(out, 1);
        }
    }

    /// Copies through the first occurrence of `terminator`, or to the end.
    pub(super) fn copy_through(&mut self, out: &mut String, terminator: &str) {
        self.copy_until(out, |s| s.starts_with(terminator));
        self.copy_n(out, terminator.chars().count());
    }

    /// Consumes characters while `keep` holds and returns them.
    pub(super) fn take_while(&mut self, mut keep: impl FnMut(char) -> bool) -> String {
        let mut taken = String::new();
        while let Some(c) = self.peek(0).filter(|&c| keep(c)) {
            taken.push(c);
            self.pos += 1;
        }
        taken
    }
}
