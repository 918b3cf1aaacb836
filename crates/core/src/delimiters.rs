use std::fmt;

/// The set of characters that separate cells. The first one is used for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    chars: Vec<char>,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self { chars: vec![' '] }
    }
}

impl Delimiters {
    /// Build a delimiter set from a string. Returns `None` for an empty string.
    pub fn new(spec: &str) -> Option<Self> {
        let mut chars: Vec<char> = Vec::new();
        for c in spec.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        if chars.is_empty() {
            None
        } else {
            Some(Self { chars })
        }
    }

    /// The canonical (output) delimiter.
    pub fn canonical(&self) -> char {
        self.chars[0]
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// True if `text` contains any delimiter character.
    pub fn any_in(&self, text: &str) -> bool {
        text.chars().any(|c| self.contains(c))
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }
}

impl fmt::Display for Delimiters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
