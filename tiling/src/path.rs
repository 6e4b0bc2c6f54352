//! Parser for straight-line path descriptions.
//!
//! Accepts the subset of SVG path data a polygonal piece needs: `M`/`m`
//! (move), `L`/`l` (line), `H`/`h` (horizontal), `V`/`v` (vertical) and
//! `Z`/`z` (close, ignored). Coordinates after a move are treated as line
//! segments, as in SVG. Every coordinate produces one boundary point; a
//! closing point that repeats the first point is dropped.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use crate::consts::EPSILON;
use crate::vector::Vector;

/// Error returned by [`parse_path`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    /// A command letter outside the straight-line subset (curves, arcs).
    #[error("unsupported path command `{0}`")]
    UnsupportedCommand(char),
    /// A numeric token that does not parse as `f64`.
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    /// A coordinate pair was cut short.
    #[error("command `{0}` is missing a coordinate")]
    MissingCoordinate(char),
    /// A character that is neither a command, a number nor a separator.
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
    /// The description contains no coordinates at all.
    #[error("path has no points")]
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

fn tokenize(d: &str) -> Result<Vec<Token>, PathError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = d.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() || c == ',' {
            i += 1;
        } else if c.is_ascii_alphabetic() && c != 'e' && c != 'E' {
            tokens.push(Token::Command(c));
            i += 1;
        } else if c.is_ascii_digit() || c == '.' || c == '-' || c == '+' {
            let start = i;
            i += 1;
            while i < chars.len() {
                let n = chars[i];
                let after_exponent = matches!(chars[i - 1], 'e' | 'E');
                if n.is_ascii_digit() || n == '.' || n == 'e' || n == 'E' || ((n == '-' || n == '+') && after_exponent) {
                    i += 1;
                } else {
                    break;
                }
            }
            let text: String = chars[start..i].iter().collect();
            let value = text.parse::<f64>().map_err(|_| PathError::InvalidNumber(text.clone()))?;
            tokens.push(Token::Number(value));
        } else {
            return Err(PathError::UnexpectedChar(c));
        }
    }
    Ok(tokens)
}

fn take_number(tokens: &[Token], at: &mut usize, mode: char) -> Result<f64, PathError> {
    match tokens.get(*at) {
        Some(Token::Number(v)) => {
            *at += 1;
            Ok(*v)
        }
        _ => Err(PathError::MissingCoordinate(mode)),
    }
}

/// Convert a path description into its boundary point sequence.
///
/// # Errors
///
/// Returns [`PathError`] for curve/arc commands, malformed numbers, truncated
/// coordinate pairs, or a description without coordinates.
pub fn parse_path(d: &str) -> Result<Vec<Vector>, PathError> {
    let tokens = tokenize(d)?;
    let mut points = Vec::new();
    let mut point = Vector::ZERO;
    let mut mode = 'l';
    let mut at = 0;

    while at < tokens.len() {
        match tokens[at] {
            Token::Command(c) => {
                if !matches!(c, 'm' | 'M' | 'l' | 'L' | 'h' | 'H' | 'v' | 'V' | 'z' | 'Z') {
                    return Err(PathError::UnsupportedCommand(c));
                }
                mode = c;
                at += 1;
                continue;
            }
            Token::Number(_) => {}
        }

        point = match mode {
            'm' | 'l' => {
                let dx = take_number(&tokens, &mut at, mode)?;
                let dy = take_number(&tokens, &mut at, mode)?;
                point + Vector::new(dx, dy)
            }
            'M' | 'L' => {
                let x = take_number(&tokens, &mut at, mode)?;
                let y = take_number(&tokens, &mut at, mode)?;
                Vector::new(x, y)
            }
            'h' => point + Vector::new(take_number(&tokens, &mut at, mode)?, 0.0),
            'v' => point + Vector::new(0.0, take_number(&tokens, &mut at, mode)?),
            'H' => Vector::new(take_number(&tokens, &mut at, mode)?, point.y),
            'V' => Vector::new(point.x, take_number(&tokens, &mut at, mode)?),
            // Numbers after a close command have no meaning.
            _ => return Err(PathError::MissingCoordinate(mode)),
        };
        points.push(point);

        // Implicit coordinates after a move continue as lines.
        if mode == 'm' {
            mode = 'l';
        } else if mode == 'M' {
            mode = 'L';
        }
    }

    let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) else {
        return Err(PathError::Empty);
    };
    if points.len() > 1 && (first - last).length2() < EPSILON {
        points.pop();
    }
    Ok(points)
}
