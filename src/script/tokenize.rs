/// Classification of one raw script line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// First non-blank characters are `#` or `//`.
    Comment,
    /// No fields at all.
    Blank,
    /// Whitespace-separated fields; the first is the command name.
    Command(Vec<&'a str>),
}

impl<'a> Line<'a> {
    pub fn fields(&self) -> &[&'a str] {
        match self {
            Self::Command(fields) => fields,
            Self::Comment | Self::Blank => &[],
        }
    }
}

/// Split one line into fields.
///
/// A field is a maximal run of non-whitespace characters; there is no
/// quoting or escaping.
pub fn tokenize(text: &str) -> Line<'_> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('#') || trimmed.starts_with("//") {
        return Line::Comment;
    }
    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    if fields.is_empty() {
        Line::Blank
    } else {
        Line::Command(fields)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/tokenize.rs"]
mod tests;
