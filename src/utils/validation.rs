//! Validation for user-entered catalog fields.
//!
//! The catalog itself treats ISBNs as opaque strings. Anything that collects
//! input from a person runs it through these helpers first.

/// Longest ISBN accepted, separators included
pub const MAX_ISBN_LENGTH: usize = 32;

/// Longest title or author accepted
pub const MAX_FIELD_LENGTH: usize = 256;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ISBN must not be empty")]
    EmptyIsbn,
    #[error("ISBN too long: exceeds {MAX_ISBN_LENGTH} characters")]
    IsbnTooLong,
    #[error("Invalid ISBN '{0}': only digits, hyphens and a final X are allowed")]
    InvalidIsbn(String),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("{0} too long: exceeds {MAX_FIELD_LENGTH} characters")]
    FieldTooLong(&'static str),
    #[error("{0} contains control characters")]
    InvalidField(&'static str),
}

/// Validate and normalize an ISBN.
///
/// Hyphens and spaces are dropped and a trailing check character `x` is
/// upper-cased. Any number of digits is accepted, but a separator may only
/// sit between two other characters, so a leading minus sign is rejected.
///
/// # Examples
///
/// ```
/// use book_catalog::utils::validation::validate_isbn;
///
/// assert_eq!(validate_isbn("978-0-13-4").unwrap(), "9780134");
/// assert_eq!(validate_isbn(" 080442957x ").unwrap(), "080442957X");
/// assert!(validate_isbn("-12").is_err());
/// assert!(validate_isbn("12a4").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::EmptyIsbn` if nothing is left after trimming,
/// `ValidationError::IsbnTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidIsbn` for any other character, a missing digit, or a
/// separator at either end or next to another separator.
pub fn validate_isbn(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyIsbn);
    }
    if trimmed.chars().count() > MAX_ISBN_LENGTH {
        return Err(ValidationError::IsbnTooLong);
    }

    let invalid = || ValidationError::InvalidIsbn(trimmed.to_string());
    let is_separator = |c: &char| *c == '-' || *c == ' ';

    let chars: Vec<char> = trimmed.chars().collect();
    if chars.first().is_some_and(is_separator)
        || chars.last().is_some_and(is_separator)
        || chars.windows(2).any(|pair| is_separator(&pair[0]) && is_separator(&pair[1]))
    {
        return Err(invalid());
    }

    let compact: Vec<char> = chars.into_iter().filter(|c| !is_separator(c)).collect();

    let Some((last, body)) = compact.split_last() else {
        return Err(invalid());
    };
    if !body.iter().all(char::is_ascii_digit) {
        return Err(invalid());
    }

    let check = match last {
        'x' | 'X' if !body.is_empty() => 'X',
        c if c.is_ascii_digit() => *c,
        _ => return Err(invalid()),
    };

    let mut normalized: String = body.iter().collect();
    normalized.push(check);
    Ok(normalized)
}

/// Validate a free-text field such as a title or author.
/// Returns the trimmed value.
///
/// # Errors
///
/// Returns `ValidationError::EmptyField`, `ValidationError::FieldTooLong` or
/// `ValidationError::InvalidField` naming the offending field.
pub fn validate_text_field(name: &'static str, input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(name));
    }
    if trimmed.chars().count() > MAX_FIELD_LENGTH {
        return Err(ValidationError::FieldTooLong(name));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::InvalidField(name));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_isbn_accepts_plain_digits() {
        assert_eq!(validate_isbn("97801348").unwrap(), "97801348");
        assert_eq!(validate_isbn("9780134685991").unwrap(), "9780134685991");
    }

    #[test]
    fn test_validate_isbn_strips_separators() {
        assert_eq!(validate_isbn("978-0-13-468599-1").unwrap(), "9780134685991");
        assert_eq!(validate_isbn("978 0 13").unwrap(), "978013");
    }

    #[test]
    fn test_validate_isbn_check_character() {
        assert_eq!(validate_isbn("0-8044-2957-x").unwrap(), "080442957X");
        // X only allowed in final position
        assert!(matches!(
            validate_isbn("08X442957"),
            Err(ValidationError::InvalidIsbn(_))
        ));
        // A lone X is not an ISBN
        assert!(validate_isbn("X").is_err());
    }

    #[test]
    fn test_validate_isbn_rejects_bad_input() {
        assert_eq!(validate_isbn("   "), Err(ValidationError::EmptyIsbn));
        assert!(matches!(
            validate_isbn("---"),
            Err(ValidationError::InvalidIsbn(_))
        ));
        assert!(matches!(
            validate_isbn("abc"),
            Err(ValidationError::InvalidIsbn(_))
        ));
        assert_eq!(
            validate_isbn(&"1".repeat(MAX_ISBN_LENGTH + 1)),
            Err(ValidationError::IsbnTooLong)
        );
    }

    #[test]
    fn test_validate_isbn_rejects_misplaced_separators() {
        for input in ["-12", "-97801348", "-1", "1---", "12-", "978--0", "978 -0", "978- 0"] {
            assert_eq!(
                validate_isbn(input),
                Err(ValidationError::InvalidIsbn(input.to_string())),
                "{input}"
            );
        }
        // Single separators between digits are still fine
        assert_eq!(validate_isbn("1-2 3").unwrap(), "123");
    }

    #[test]
    fn test_validate_text_field() {
        assert_eq!(validate_text_field("Title", "  Hash Table ").unwrap(), "Hash Table");
        assert_eq!(
            validate_text_field("Author", ""),
            Err(ValidationError::EmptyField("Author"))
        );
        assert_eq!(
            validate_text_field("Title", "bad\u{7}bell"),
            Err(ValidationError::InvalidField("Title"))
        );
        assert_eq!(
            validate_text_field("Title", &"a".repeat(MAX_FIELD_LENGTH + 1)),
            Err(ValidationError::FieldTooLong("Title"))
        );
    }
}
