use crate::position::Position;
use std::fmt;

/// Malformed style text. Positions are in the coordinates of the parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleParseError {
    /// A `{` without its `}`
    UnclosedBlock { position: Position },
    /// A `}` with no open block
    UnexpectedClose { position: Position },
    /// A statement that is neither a declaration nor a rule
    UnknownWord { word: String, position: Position },
    UnclosedComment { position: Position },
    UnclosedString { position: Position },
    UnexpectedCharacter { text: String, position: Position },
}

impl StyleParseError {
    pub fn position(&self) -> Position {
        match self {
            StyleParseError::UnclosedBlock { position }
            | StyleParseError::UnexpectedClose { position }
            | StyleParseError::UnknownWord { position, .. }
            | StyleParseError::UnclosedComment { position }
            | StyleParseError::UnclosedString { position }
            | StyleParseError::UnexpectedCharacter { position, .. } => *position,
        }
    }
}

impl fmt::Display for StyleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleParseError::UnclosedBlock { position } => write!(f, "{position}: Unclosed block"),
            StyleParseError::UnexpectedClose { position } => {
                write!(f, "{position}: Unexpected }}")
            }
            StyleParseError::UnknownWord { word, position } => {
                write!(f, "{position}: Unknown word '{word}'")
            }
            StyleParseError::UnclosedComment { position } => {
                write!(f, "{position}: Unclosed comment")
            }
            StyleParseError::UnclosedString { position } => write!(f, "{position}: Unclosed string"),
            StyleParseError::UnexpectedCharacter { text, position } => {
                write!(f, "{position}: Unexpected '{text}'")
            }
        }
    }
}

impl std::error::Error for StyleParseError {}
