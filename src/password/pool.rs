//! Character classes, generator flags and the character pools built from them.

use bitflags::bitflags;
use log::debug;

/// Lower case characters pool.
pub const POOL_LOWER_CASE: &str = "abcdefghjkmnpqrstuvwxyz";

/// Lower case look-alike characters.
pub const POOL_LOWER_CASE_CONFLICT: &str = "ilo";

/// Upper case characters pool.
pub const POOL_UPPER_CASE: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Upper case look-alike characters.
pub const POOL_UPPER_CASE_CONFLICT: &str = "OI";

/// Digits pool.
pub const POOL_DIGITS: &str = "23456789";

/// Digits look-alike characters.
pub const POOL_DIGITS_CONFLICT: &str = "10";

/// Special characters pool, space excluded.
pub const POOL_SPECIAL: &str = r#"~@#$%^&*()_-+=[]|\:;"'<>.?/"#;

/// Special look-alike characters.
pub const POOL_SPECIAL_CONFLICT: &str = "`{}!,";

/// Space character.
pub const POOL_SPACE: &str = " ";

bitflags! {
    /// Set of character classes used to build the pool.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharacterClass: u8 {
        const LOWER_LETTERS = 0x01;
        const UPPER_LETTERS = 0x02;
        const DIGITS = 0x04;
        /// Special characters except space.
        const SPECIAL_CHARACTERS = 0x08;
        const SPACE = 0x10;
        const ALL_LETTERS = Self::LOWER_LETTERS.bits() | Self::UPPER_LETTERS.bits();
        const ALPHA_NUMERIC = Self::ALL_LETTERS.bits() | Self::DIGITS.bits();
        const ALL = Self::ALPHA_NUMERIC.bits()
            | Self::SPECIAL_CHARACTERS.bits()
            | Self::SPACE.bits();
    }
}

impl Default for CharacterClass {
    fn default() -> Self {
        Self::ALL
    }
}

bitflags! {
    /// Modifiers applied while generating a password.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GeneratorFlag: u8 {
        const NONE = 0x0;
        /// Leave the look-alike characters out of the pool.
        const EXCLUDE_LOOK_ALIKE = 0x1;
        /// Shuffle the pool before drawing characters.
        const SHUFFLE_CHARS = 0x2;
        /// Seal passwords produced by `generate_secure` as read only.
        const MAKE_READ_ONLY = 0x4;
    }
}

impl Default for GeneratorFlag {
    fn default() -> Self {
        Self::NONE
    }
}

/// Pool sections in the order they are appended.
const SECTIONS: [(CharacterClass, &str, &str); 5] = [
    (
        CharacterClass::UPPER_LETTERS,
        POOL_UPPER_CASE,
        POOL_UPPER_CASE_CONFLICT,
    ),
    (
        CharacterClass::LOWER_LETTERS,
        POOL_LOWER_CASE,
        POOL_LOWER_CASE_CONFLICT,
    ),
    (CharacterClass::DIGITS, POOL_DIGITS, POOL_DIGITS_CONFLICT),
    (
        CharacterClass::SPECIAL_CHARACTERS,
        POOL_SPECIAL,
        POOL_SPECIAL_CONFLICT,
    ),
    (CharacterClass::SPACE, POOL_SPACE, ""),
];

/// Builds the characters pool for the given classes.
///
/// Classes are appended in a fixed order: upper letters, lower letters,
/// digits, special characters and space. Unless
/// [`GeneratorFlag::EXCLUDE_LOOK_ALIKE`] is set, the look-alike characters of
/// a class follow its base characters directly.
///
/// # Examples
///
/// ```
/// use candy_rs::password::{build_pool, CharacterClass, GeneratorFlag};
///
/// let pool = build_pool(CharacterClass::DIGITS, GeneratorFlag::NONE);
/// assert_eq!(pool.iter().collect::<String>(), "2345678910");
///
/// let pool = build_pool(CharacterClass::DIGITS, GeneratorFlag::EXCLUDE_LOOK_ALIKE);
/// assert_eq!(pool.iter().collect::<String>(), "23456789");
/// ```
pub fn build_pool(classes: CharacterClass, flags: GeneratorFlag) -> Vec<char> {
    let include_look_alike = !flags.contains(GeneratorFlag::EXCLUDE_LOOK_ALIKE);
    let mut chars: Vec<char> = Vec::with_capacity(96);

    for (class, base, conflict) in SECTIONS {
        if !classes.contains(class) {
            continue;
        }
        chars.extend(base.chars());
        if include_look_alike {
            chars.extend(conflict.chars());
        }
    }

    debug!(
        "Built characters pool of {} chars (classes: {:#04x}, flags: {:#04x})",
        chars.len(),
        classes.bits(),
        flags.bits()
    );

    chars
}

/// Returns `true` when `c` belongs to the special pool or its look-alikes.
pub(crate) fn is_special(c: char) -> bool {
    POOL_SPECIAL.contains(c) || POOL_SPECIAL_CONFLICT.contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_string(classes: CharacterClass, flags: GeneratorFlag) -> String {
        build_pool(classes, flags).into_iter().collect()
    }

    #[test]
    fn should_append_classes_in_fixed_order() {
        let pool = pool_string(CharacterClass::ALPHA_NUMERIC, GeneratorFlag::NONE);
        let expected = format!(
            "{}{}{}{}{}{}",
            POOL_UPPER_CASE,
            POOL_UPPER_CASE_CONFLICT,
            POOL_LOWER_CASE,
            POOL_LOWER_CASE_CONFLICT,
            POOL_DIGITS,
            POOL_DIGITS_CONFLICT
        );
        assert_eq!(pool, expected);
    }

    #[test]
    fn should_exclude_look_alike_characters() {
        let pool = pool_string(CharacterClass::ALL, GeneratorFlag::EXCLUDE_LOOK_ALIKE);
        for c in "iloOI10`{}!,".chars() {
            assert!(!pool.contains(c), "unexpected look-alike {c:?}");
        }
        assert_eq!(pool.chars().count(), 24 + 23 + 8 + 27 + 1);
    }

    #[test]
    fn all_classes_should_produce_full_pool() {
        let pool = build_pool(CharacterClass::ALL, GeneratorFlag::NONE);
        assert_eq!(pool.len(), 26 + 26 + 10 + 32 + 1);
        assert_eq!(pool.last(), Some(&' '));
    }

    #[test]
    fn space_should_not_imply_other_classes() {
        let pool = pool_string(CharacterClass::SPACE, GeneratorFlag::NONE);
        assert_eq!(pool, " ");
    }

    #[test]
    fn empty_classes_should_produce_empty_pool() {
        assert!(build_pool(CharacterClass::empty(), GeneratorFlag::NONE).is_empty());
    }

    #[test]
    fn flag_sets_should_combine() {
        let mut flags = GeneratorFlag::SHUFFLE_CHARS;
        flags |= GeneratorFlag::MAKE_READ_ONLY;
        assert!(flags.contains(GeneratorFlag::SHUFFLE_CHARS));
        assert!(flags.contains(GeneratorFlag::MAKE_READ_ONLY));
        assert!(!flags.contains(GeneratorFlag::EXCLUDE_LOOK_ALIKE));
        assert!(GeneratorFlag::default().is_empty());
        assert_eq!(CharacterClass::default(), CharacterClass::ALL);
        assert!(CharacterClass::ALL.contains(CharacterClass::ALL_LETTERS));
    }

    #[test]
    fn space_bit_should_not_overlap_other_classes() {
        assert_eq!(CharacterClass::SPACE.bits(), 0x10);
        assert!(!CharacterClass::SPACE.intersects(CharacterClass::ALPHA_NUMERIC));
        assert!(!CharacterClass::SPACE.intersects(CharacterClass::SPECIAL_CHARACTERS));
        assert_eq!(CharacterClass::ALL.bits(), 0x1f);

        let mut classes = CharacterClass::empty();
        classes |= CharacterClass::SPACE;
        assert_eq!(classes, CharacterClass::SPACE);
        assert!(!classes.contains(CharacterClass::UPPER_LETTERS));
    }

    #[test]
    fn is_special_should_cover_conflict_pool() {
        assert!(is_special('_'));
        assert!(is_special('!'));
        assert!(!is_special('a'));
        assert!(!is_special(' '));
    }
}
