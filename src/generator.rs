// Passbox — Password generation
//
// Random passwords from configurable character classes. Every selected
// class contributes at least one character, so "with symbols" really
// means the result contains a symbol.

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use thiserror::Error;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("password length must be at least 1")]
    ZeroLength,

    #[error("at least one character class must be enabled")]
    NoClasses,

    #[error("length {length} is too short for {classes} required character classes")]
    LengthTooShort { length: usize, classes: usize },
}

/// Which character classes to draw from, and how long the result is.
#[derive(Debug, Clone)]
pub struct PasswordSpec {
    pub length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for PasswordSpec {
    fn default() -> Self {
        Self {
            length: 16,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: true,
        }
    }
}

/// Generate a random password matching the spec.
pub fn generate_password(spec: &PasswordSpec) -> Result<String, GeneratorError> {
    if spec.length == 0 {
        return Err(GeneratorError::ZeroLength);
    }

    let mut classes: Vec<&[u8]> = Vec::new();
    if spec.lowercase {
        classes.push(LOWERCASE);
    }
    if spec.uppercase {
        classes.push(UPPERCASE);
    }
    if spec.digits {
        classes.push(DIGITS);
    }
    if spec.symbols {
        classes.push(SYMBOLS);
    }

    if classes.is_empty() {
        return Err(GeneratorError::NoClasses);
    }
    if spec.length < classes.len() {
        return Err(GeneratorError::LengthTooShort {
            length: spec.length,
            classes: classes.len(),
        });
    }

    let mut rng = thread_rng();
    let mut bytes = Vec::with_capacity(spec.length);

    // One character from every selected class, then fill from the union.
    for class in &classes {
        bytes.push(class[rng.gen_range(0..class.len())]);
    }
    let combined: Vec<u8> = classes.concat();
    while bytes.len() < spec.length {
        bytes.push(combined[rng.gen_range(0..combined.len())]);
    }
    bytes.shuffle(&mut rng);

    Ok(bytes.into_iter().map(char::from).collect())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
