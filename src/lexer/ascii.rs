//! ASCII character predicates used by the scanner

/// Returns true for `a`-`z` and `A`-`Z`
pub fn is_letter(ch: char) -> bool {
    matches!(ch, 'a'..='z' | 'A'..='Z')
}

/// Returns true for `0`-`9`
pub fn is_digit(ch: char) -> bool {
    matches!(ch, '0'..='9')
}
