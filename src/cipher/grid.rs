use itertools::Itertools;
use log::trace;
use rustc_hash::FxHashMap;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Rows and columns of each grid.
pub const GRID_SIZE: usize = 12;

/// Errors raised when building or editing a grid directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The position is outside the grid.
    #[error("cell ({row}, {column}) is outside the {size}x{size} grid", size = GRID_SIZE)]
    OutOfBounds {
        /// Row index.
        row: usize,
        /// Column index.
        column: usize,
    },
    /// The ciphertext has more rows than the grid.
    #[error("ciphertext has {0} rows, at most {max} fit", max = GRID_SIZE)]
    TooManyRows(usize),
    /// A ciphertext row is longer than the grid.
    #[error("ciphertext row {row} has {len} cells, at most {max} fit", max = GRID_SIZE)]
    RowTooLong {
        /// Row index.
        row: usize,
        /// Number of cells in the row.
        len: usize,
    },
    /// A character is neither a letter nor an empty-cell marker.
    #[error("unexpected character '{found}' at ({row}, {column})")]
    InvalidCharacter {
        /// Row index.
        row: usize,
        /// Column index.
        column: usize,
        /// The offending character.
        found: char,
    },
    /// A substitution is not a pair of letters.
    #[error("substitution '{0}' must be two letters, cipher then plain")]
    InvalidSubstitution(String),
    /// A key name is not recognised.
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

/// One cell of the ciphertext grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    /// The ciphertext letter, if any.
    pub letter: Option<char>,
    /// Whether the user highlighted the cell.
    pub marked: bool,
}

/// Which of the two grids the cursor is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pane {
    /// Typing writes ciphertext letters.
    #[default]
    Cipher,
    /// Typing assigns plaintext letters to the cell's ciphertext letter.
    Plain,
}

impl Pane {
    /// The other pane.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Cipher => Self::Plain,
            Self::Plain => Self::Cipher,
        }
    }
}

/// The cursor position, shared by both grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub column: usize,
    /// Active grid.
    pub pane: Pane,
}

/// A key press understood by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move one row up, stopping at the top.
    Up,
    /// Move one row down, stopping at the bottom.
    Down,
    /// Move one cell back, wrapping across rows and around the grid.
    Left,
    /// Move one cell forward, wrapping across rows and around the grid.
    Right,
    /// Same as `Left`.
    Backspace,
    /// Same as `Left`.
    Delete,
    /// Toggle the mark of the cell under the cursor.
    Space,
    /// Switch between the cipher and plain grid.
    Enter,
    /// Type a letter.
    Letter(char),
}

impl FromStr for Key {
    type Err = GridError;

    /// Key names as used by `--keys`: `up`, `down`, `left`, `right`, `backspace`,
    /// `delete`, `space`, `enter`, or a single letter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_ascii_lowercase().as_str() {
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "backspace" => Self::Backspace,
            "delete" => Self::Delete,
            "space" => Self::Space,
            "enter" => Self::Enter,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => Self::Letter(c),
                    _ => return Err(GridError::UnknownKey(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

/// Two 12x12 grids: the ciphertext as typed, and its decryption under the
/// current substitution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CipherGrid {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
    cipher: FxHashMap<char, char>,
    cursor: Cursor,
}

impl CipherGrid {
    /// Empty grids, no substitutions, cursor at the top left of the cipher grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grids pre-filled with ciphertext, one string per row.
    ///
    /// Letters fill cells; `.`, `_` and spaces leave them empty. Rows shorter than
    /// the grid are padded with empty cells.
    ///
    /// # Errors
    ///
    /// If the text does not fit the grid or contains other characters.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        if rows.len() > GRID_SIZE {
            return Err(GridError::TooManyRows(rows.len()));
        }

        let mut grid = Self::new();
        for (row, text) in rows.iter().enumerate() {
            let chars = text.as_ref().trim_end().chars().collect_vec();
            if chars.len() > GRID_SIZE {
                return Err(GridError::RowTooLong {
                    row,
                    len: chars.len(),
                });
            }
            for (column, &c) in chars.iter().enumerate() {
                let letter = match c {
                    '.' | '_' | ' ' => None,
                    c if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
                    found => {
                        return Err(GridError::InvalidCharacter { row, column, found });
                    }
                };
                grid.cells[row][column].letter = letter;
            }
        }
        Ok(grid)
    }

    /// Cell at a position.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|r| r.get(column))
    }

    /// The cursor.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Plain letter currently assigned to a cipher letter.
    #[must_use]
    pub fn substitution(&self, cipher: char) -> Option<char> {
        self.cipher.get(&cipher.to_ascii_uppercase()).copied()
    }

    /// All substitutions, sorted by cipher letter.
    #[must_use]
    pub fn substitutions(&self) -> Vec<(char, char)> {
        self.cipher
            .iter()
            .map(|(&c, &p)| (c, p))
            .sorted()
            .collect()
    }

    /// Assigns a plain letter to a cipher letter, replacing any earlier one.
    pub fn substitute(&mut self, cipher: char, plain: char) {
        let cipher = cipher.to_ascii_uppercase();
        let plain = plain.to_ascii_uppercase();
        trace!("substitute {cipher} -> {plain}");
        let _ = self.cipher.insert(cipher, plain);
    }

    /// Applies a substitution written as two letters, e.g. `QE` for `Q -> E`.
    ///
    /// # Errors
    ///
    /// If `pair` is not exactly two ASCII letters.
    pub fn substitute_pair(&mut self, pair: &str) -> Result<(), GridError> {
        let mut chars = pair.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(c), Some(p), None) if c.is_ascii_alphabetic() && p.is_ascii_alphabetic() => {
                self.substitute(c, p);
                Ok(())
            }
            _ => Err(GridError::InvalidSubstitution(pair.to_string())),
        }
    }

    /// What the plain grid shows at a position: the substitution of the cell's
    /// letter, or nothing.
    #[must_use]
    pub fn plain_letter(&self, row: usize, column: usize) -> Option<char> {
        self.cell(row, column)?
            .letter
            .and_then(|letter| self.substitution(letter))
    }

    /// Replaces one cell.
    ///
    /// # Errors
    ///
    /// If the position is outside the grid.
    pub fn update_cell(&mut self, row: usize, column: usize, cell: Cell) -> Result<(), GridError> {
        let slot = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(column))
            .ok_or(GridError::OutOfBounds { row, column })?;
        *slot = cell;
        Ok(())
    }

    /// Flips the mark of one cell.
    ///
    /// # Errors
    ///
    /// If the position is outside the grid.
    pub fn toggle_mark(&mut self, row: usize, column: usize) -> Result<(), GridError> {
        let cell = *self
            .cell(row, column)
            .ok_or(GridError::OutOfBounds { row, column })?;
        self.update_cell(
            row,
            column,
            Cell {
                marked: !cell.marked,
                ..cell
            },
        )
    }

    /// A click on a cell of one of the grids.
    ///
    /// Clicking where the cursor already is toggles the mark; anywhere else the
    /// cursor moves there.
    ///
    /// # Errors
    ///
    /// If the position is outside the grid.
    pub fn click(&mut self, row: usize, column: usize, pane: Pane) -> Result<(), GridError> {
        let target = Cursor { row, column, pane };
        if target == self.cursor {
            return self.toggle_mark(row, column);
        }
        if self.cell(row, column).is_none() {
            return Err(GridError::OutOfBounds { row, column });
        }
        self.cursor = target;
        Ok(())
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: Key) {
        trace!("key {key:?} at {:?}", self.cursor);
        let Cursor { row, column, .. } = self.cursor;
        match key {
            Key::Up => self.cursor.row = row.saturating_sub(1),
            Key::Down => self.cursor.row = (row + 1).min(GRID_SIZE - 1),
            Key::Left | Key::Backspace | Key::Delete => self.step_back(),
            Key::Right => self.step_forward(),
            Key::Space => {
                let cell = &mut self.cells[row][column];
                cell.marked = !cell.marked;
            }
            Key::Enter => self.cursor.pane = self.cursor.pane.toggled(),
            Key::Letter(letter) => self.input_letter(letter),
        }
    }

    /// Handles a sequence of key presses.
    pub fn handle_keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.handle_key(key);
        }
    }

    fn input_letter(&mut self, letter: char) {
        if !letter.is_ascii_alphabetic() {
            return;
        }
        let letter = letter.to_ascii_uppercase();
        let Cursor { row, column, pane } = self.cursor;
        match pane {
            Pane::Cipher => self.cells[row][column].letter = Some(letter),
            Pane::Plain => {
                if let Some(cipher) = self.cells[row][column].letter {
                    self.substitute(cipher, letter);
                }
            }
        }
        self.step_forward();
    }

    fn step_forward(&mut self) {
        let Cursor { row, column, .. } = self.cursor;
        let (row, column) = if column + 1 < GRID_SIZE {
            (row, column + 1)
        } else if row + 1 < GRID_SIZE {
            (row + 1, 0)
        } else {
            (0, 0)
        };
        self.cursor.row = row;
        self.cursor.column = column;
    }

    fn step_back(&mut self) {
        let Cursor { row, column, .. } = self.cursor;
        let (row, column) = match (row, column) {
            (0, 0) => (GRID_SIZE - 1, GRID_SIZE - 1),
            (row, 0) => (row - 1, GRID_SIZE - 1),
            (row, column) => (row, column - 1),
        };
        self.cursor.row = row;
        self.cursor.column = column;
    }

    fn render_cell(&self, row: usize, column: usize, pane: Pane) -> String {
        let cell = self.cells[row][column];
        let letter = match pane {
            Pane::Cipher => cell.letter,
            Pane::Plain => self.plain_letter(row, column),
        };
        let at_cursor = self.cursor.row == row && self.cursor.column == column;
        let open = match (at_cursor, self.cursor.pane == pane) {
            (true, true) => '[',
            (true, false) => '(',
            _ if cell.marked => '*',
            _ => ' ',
        };
        let close = match open {
            _ if cell.marked => '*',
            '[' => ']',
            '(' => ')',
            _ => ' ',
        };
        format!("{open}{}{close}", letter.unwrap_or('.'))
    }
}

impl Display for CipherGrid {
    /// Both grids side by side. `[X]` is the cursor in the active grid, `(X)` its
    /// shadow in the other one, `*X*` a marked cell. A marked cell under the
    /// cursor closes with `*` instead: `[X*` and `(X*`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..GRID_SIZE {
            let cipher = (0..GRID_SIZE)
                .map(|column| self.render_cell(row, column, Pane::Cipher))
                .join("");
            let plain = (0..GRID_SIZE)
                .map(|column| self.render_cell(row, column, Pane::Plain))
                .join("");
            writeln!(f, "{cipher}    {plain}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(grid: &CipherGrid) -> (usize, usize) {
        (grid.cursor().row, grid.cursor().column)
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = CipherGrid::new();
        assert_eq!(grid.cell(0, 0), Some(&Cell::default()));
        assert_eq!(grid.cell(11, 11), Some(&Cell::default()));
        assert_eq!(grid.cell(12, 0), None);
        assert_eq!(grid.cursor(), Cursor::default());
        assert!(grid.substitutions().is_empty());
    }

    #[test]
    fn test_vertical_moves_clamp() {
        let mut grid = CipherGrid::new();
        grid.handle_key(Key::Up);
        assert_eq!(at(&grid), (0, 0));
        grid.handle_keys(std::iter::repeat_n(Key::Down, 20));
        assert_eq!(at(&grid), (11, 0));
    }

    #[test]
    fn test_horizontal_moves_wrap() {
        let mut grid = CipherGrid::new();
        grid.handle_key(Key::Left);
        assert_eq!(at(&grid), (11, 11));
        grid.handle_key(Key::Right);
        assert_eq!(at(&grid), (0, 0));

        grid.handle_keys(std::iter::repeat_n(Key::Right, 12));
        assert_eq!(at(&grid), (1, 0));
        grid.handle_key(Key::Backspace);
        assert_eq!(at(&grid), (0, 11));
        grid.handle_key(Key::Delete);
        assert_eq!(at(&grid), (0, 10));
    }

    #[test]
    fn test_typing_cipher_letters_advances() {
        let mut grid = CipherGrid::new();
        grid.handle_keys("xy".chars().map(Key::Letter));
        assert_eq!(grid.cell(0, 0).unwrap().letter, Some('X'));
        assert_eq!(grid.cell(0, 1).unwrap().letter, Some('Y'));
        assert_eq!(at(&grid), (0, 2));
    }

    #[test]
    fn test_typing_in_plain_grid_substitutes() {
        let mut grid = CipherGrid::from_rows(&["QXQ"]).unwrap();
        grid.handle_key(Key::Enter);
        assert_eq!(grid.cursor().pane, Pane::Plain);

        grid.handle_key(Key::Letter('e'));
        assert_eq!(grid.substitution('Q'), Some('E'));
        assert_eq!(grid.plain_letter(0, 2), Some('E'));
        assert_eq!(grid.plain_letter(0, 1), None);
        // The cipher grid is unchanged.
        assert_eq!(grid.cell(0, 0).unwrap().letter, Some('Q'));
        assert_eq!(at(&grid), (0, 1));
    }

    #[test]
    fn test_plain_letter_on_empty_cell_only_moves() {
        let mut grid = CipherGrid::new();
        grid.handle_keys([Key::Enter, Key::Letter('a')]);
        assert!(grid.substitutions().is_empty());
        assert_eq!(at(&grid), (0, 1));
    }

    #[test]
    fn test_non_letters_are_ignored() {
        let mut grid = CipherGrid::new();
        grid.handle_key(Key::Letter('7'));
        assert_eq!(grid.cell(0, 0).unwrap().letter, None);
        assert_eq!(at(&grid), (0, 0));
    }

    #[test]
    fn test_space_toggles_mark() {
        let mut grid = CipherGrid::new();
        grid.handle_key(Key::Space);
        assert!(grid.cell(0, 0).unwrap().marked);
        grid.handle_key(Key::Space);
        assert!(!grid.cell(0, 0).unwrap().marked);
    }

    #[test]
    fn test_click() {
        let mut grid = CipherGrid::new();
        grid.click(3, 4, Pane::Plain).unwrap();
        assert_eq!(
            grid.cursor(),
            Cursor {
                row: 3,
                column: 4,
                pane: Pane::Plain
            }
        );
        assert!(!grid.cell(3, 4).unwrap().marked);

        grid.click(3, 4, Pane::Plain).unwrap();
        assert!(grid.cell(3, 4).unwrap().marked);

        // Same cell in the other grid only moves the cursor across.
        grid.click(3, 4, Pane::Cipher).unwrap();
        assert_eq!(grid.cursor().pane, Pane::Cipher);
        assert!(grid.cell(3, 4).unwrap().marked);

        assert_eq!(
            grid.click(12, 0, Pane::Cipher),
            Err(GridError::OutOfBounds { row: 12, column: 0 })
        );
    }

    #[test]
    fn test_from_rows_errors() {
        let rows = vec!["A"; 13];
        assert_eq!(CipherGrid::from_rows(&rows), Err(GridError::TooManyRows(13)));
        assert_eq!(
            CipherGrid::from_rows(&["ABCDEFGHIJKLM"]),
            Err(GridError::RowTooLong { row: 0, len: 13 })
        );
        assert_eq!(
            CipherGrid::from_rows(&["AB", "C1"]),
            Err(GridError::InvalidCharacter {
                row: 1,
                column: 1,
                found: '1'
            })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GridError::TooManyRows(13).to_string(),
            "ciphertext has 13 rows, at most 12 fit"
        );
        assert_eq!(
            GridError::RowTooLong { row: 0, len: 13 }.to_string(),
            "ciphertext row 0 has 13 cells, at most 12 fit"
        );
        assert_eq!(
            GridError::OutOfBounds { row: 12, column: 0 }.to_string(),
            "cell (12, 0) is outside the 12x12 grid"
        );
    }

    #[test]
    fn test_substitute_pair() {
        let mut grid = CipherGrid::from_rows(&["k.z"]).unwrap();
        grid.substitute_pair("kt").unwrap();
        grid.substitute_pair("ZO").unwrap();
        assert_eq!(grid.substitutions(), vec![('K', 'T'), ('Z', 'O')]);
        assert_eq!(grid.plain_letter(0, 2), Some('O'));
        assert!(grid.substitute_pair("K").is_err());
        assert!(grid.substitute_pair("K9").is_err());
    }

    #[test]
    fn test_key_names() {
        assert_eq!("Enter".parse::<Key>(), Ok(Key::Enter));
        assert_eq!("q".parse::<Key>(), Ok(Key::Letter('q')));
        assert_eq!(
            "pgup".parse::<Key>(),
            Err(GridError::UnknownKey("pgup".to_string()))
        );
    }

    #[test]
    fn test_render() {
        let mut grid = CipherGrid::from_rows(&["AB"]).unwrap();
        grid.substitute('B', 'x');
        let text = grid.to_string();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("[A] B "));
        assert!(first.contains("(.) X "));
        assert_eq!(text.lines().count(), GRID_SIZE);
    }

    #[test]
    fn test_render_marked_cell_under_cursor() {
        let mut grid = CipherGrid::from_rows(&["AB"]).unwrap();
        grid.handle_key(Key::Space);
        let text = grid.to_string();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("[A* B "), "{first}");
        assert!(first.contains("(.* . "), "{first}");

        grid.handle_key(Key::Right);
        let text = grid.to_string();
        assert!(text.starts_with("*A*[B]"), "{text}");
    }
}
