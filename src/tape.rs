//! This module defines the `Tape`, an unbounded two-way tape backed by a sparse map.
//! Unwritten cells read as the blank symbol, so the tape never needs to be resized.

use crate::types::Direction;
use std::collections::HashMap;

/// An unbounded, bidirectional tape with a single read/write head.
///
/// `leftmost` and `rightmost` track the extreme positions ever written or visited.
/// They only drive rendering; reading and writing never depend on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: HashMap<i64, char>,
    blank: char,
    head: i64,
    leftmost: i64,
    rightmost: i64,
}

impl Tape {
    /// Creates a tape holding `input` from position 0, with the head on the first cell.
    pub fn new(input: &str, blank: char) -> Self {
        let cells: HashMap<i64, char> = input
            .chars()
            .enumerate()
            .map(|(i, symbol)| (i as i64, symbol))
            .collect();
        let rightmost = (cells.len() as i64 - 1).max(0);

        Self {
            cells,
            blank,
            head: 0,
            leftmost: 0,
            rightmost,
        }
    }

    /// Returns the symbol under the head, or the blank symbol for an unwritten cell.
    pub fn read(&self) -> char {
        self.symbol_at(self.head)
    }

    /// Writes `symbol` to the cell under the head.
    pub fn write(&mut self, symbol: char) {
        self.cells.insert(self.head, symbol);
        self.include(self.head);
    }

    /// Moves the head one cell in `direction`.
    pub fn move_head(&mut self, direction: Direction) {
        self.head += direction.offset();
        self.include(self.head);
    }

    /// Returns the symbol at an arbitrary position.
    pub fn symbol_at(&self, position: i64) -> char {
        self.cells.get(&position).copied().unwrap_or(self.blank)
    }

    pub fn head(&self) -> i64 {
        self.head
    }

    pub fn leftmost(&self) -> i64 {
        self.leftmost
    }

    pub fn rightmost(&self) -> i64 {
        self.rightmost
    }

    pub fn blank(&self) -> char {
        self.blank
    }

    /// Returns the symbols between `leftmost` and `rightmost`, inclusive.
    pub fn contents(&self) -> String {
        self.span(self.leftmost, self.rightmost)
    }

    /// Renders a window of the tape with a `^` marker under the head.
    ///
    /// The window covers every cell ever written or visited and at least `context`
    /// cells on each side of the head. The output has two lines: the cells, then
    /// the marker.
    pub fn render(&self, context: usize) -> String {
        let (start, end) = self.window(context);
        let pointer = " ".repeat((self.head - start) as usize);
        format!("{}\n{}^", self.span(start, end), pointer)
    }

    /// First and last position shown by `render`.
    fn window(&self, context: usize) -> (i64, i64) {
        let context = i64::try_from(context).unwrap_or(i64::MAX);
        let start = self.leftmost.min(self.head.saturating_sub(context));
        let end = self.rightmost.max(self.head.saturating_add(context));
        (start, end)
    }

    fn span(&self, start: i64, end: i64) -> String {
        (start..=end).map(|position| self.symbol_at(position)).collect()
    }

    fn include(&mut self, position: i64) {
        self.leftmost = self.leftmost.min(position);
        self.rightmost = self.rightmost.max(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tape_bounds() {
        let tape = Tape::new("abc", '_');

        assert_eq!(tape.head(), 0);
        assert_eq!(tape.leftmost(), 0);
        assert_eq!(tape.rightmost(), 2);
        assert_eq!(tape.read(), 'a');
        assert_eq!(tape.contents(), "abc");
    }

    #[test]
    fn test_empty_tape_reads_blank() {
        let tape = Tape::new("", '_');

        assert_eq!(tape.rightmost(), 0);
        assert_eq!(tape.read(), '_');
        assert_eq!(tape.symbol_at(-42), '_');
        assert_eq!(tape.symbol_at(42), '_');
    }

    #[test]
    fn test_write_replaces_symbol_under_head() {
        let mut tape = Tape::new("abc", '_');
        tape.move_head(Direction::Right);
        tape.write('x');

        assert_eq!(tape.read(), 'x');
        assert_eq!(tape.contents(), "axc");
    }

    #[test]
    fn test_growth_to_the_left() {
        let mut tape = Tape::new("ab", '_');
        tape.move_head(Direction::Left);
        assert_eq!(tape.head(), -1);
        assert_eq!(tape.leftmost(), -1);

        tape.move_head(Direction::Left);
        tape.write('z');

        assert_eq!(tape.head(), -2);
        assert_eq!(tape.leftmost(), -2);
        assert_eq!(tape.rightmost(), 1);
        assert_eq!(tape.contents(), "z_ab");
    }

    #[test]
    fn test_growth_to_the_right() {
        let mut tape = Tape::new("ab", '_');
        for _ in 0..4 {
            tape.move_head(Direction::Right);
        }
        tape.write('z');

        assert_eq!(tape.head(), 4);
        assert_eq!(tape.leftmost(), 0);
        assert_eq!(tape.rightmost(), 4);
        assert_eq!(tape.contents(), "ab__z");
    }

    #[test]
    fn test_bounds_follow_head_without_writes() {
        let mut tape = Tape::new("", '_');
        tape.move_head(Direction::Right);
        tape.move_head(Direction::Right);
        tape.move_head(Direction::Left);

        assert_eq!(tape.rightmost(), 2);
        assert_eq!(tape.head(), 1);
    }

    #[test]
    fn test_render_window_and_pointer() {
        let mut tape = Tape::new("01", '_');
        tape.move_head(Direction::Right);

        let rendered = tape.render(2);
        let lines: Vec<&str> = rendered.lines().collect();

        // start = min(0, 1 - 2) = -1, end = max(1, 1 + 2) = 3
        assert_eq!(lines[0], "_01__");
        assert_eq!(lines[1], "  ^");
    }

    #[test]
    fn test_render_covers_bounds_with_zero_context() {
        let mut tape = Tape::new("abcd", '_');
        tape.move_head(Direction::Left);

        let rendered = tape.render(0);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "_abcd");
        assert_eq!(lines[1], "^");
    }

    #[test]
    fn test_window_saturates_for_huge_context() {
        let mut tape = Tape::new("ab", '_');
        tape.move_head(Direction::Right);

        assert_eq!(tape.window(3), (-2, 4));
        assert_eq!(tape.window(usize::MAX), (1 - i64::MAX, i64::MAX));
    }

    #[test]
    fn test_render_is_pure() {
        let tape = Tape::new("abc", '_');
        let before = tape.clone();
        let _ = tape.render(10);

        assert_eq!(tape, before);
    }
}
