use serde::{Deserialize, Serialize};

use super::{
    generator::{PasswordGenerator, PasswordGeneratorBuilder, DEFAULT_PASSWORD_LENGTH},
    pool::{CharacterClass, GeneratorFlag},
    random::RandomSource,
};
use crate::error::CandyError;

/// Character class names accepted in settings files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassName {
    LowerLetters,
    UpperLetters,
    Digits,
    SpecialCharacters,
    Space,
    AllLetters,
    AlphaNumeric,
    All,
}

impl From<ClassName> for CharacterClass {
    fn from(name: ClassName) -> Self {
        match name {
            ClassName::LowerLetters => CharacterClass::LOWER_LETTERS,
            ClassName::UpperLetters => CharacterClass::UPPER_LETTERS,
            ClassName::Digits => CharacterClass::DIGITS,
            ClassName::SpecialCharacters => CharacterClass::SPECIAL_CHARACTERS,
            ClassName::Space => CharacterClass::SPACE,
            ClassName::AllLetters => CharacterClass::ALL_LETTERS,
            ClassName::AlphaNumeric => CharacterClass::ALPHA_NUMERIC,
            ClassName::All => CharacterClass::ALL,
        }
    }
}

/// Generator flag names accepted in settings files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagName {
    ExcludeLookAlike,
    ShuffleChars,
    MakeReadOnly,
}

impl From<FlagName> for GeneratorFlag {
    fn from(name: FlagName) -> Self {
        match name {
            FlagName::ExcludeLookAlike => GeneratorFlag::EXCLUDE_LOOK_ALIKE,
            FlagName::ShuffleChars => GeneratorFlag::SHUFFLE_CHARS,
            FlagName::MakeReadOnly => GeneratorFlag::MAKE_READ_ONLY,
        }
    }
}

/// Serializable generator configuration.
///
/// Missing fields take the generator defaults.
///
/// # Examples
///
/// ```
/// use candy_rs::password::{GeneratorSettings, SeededRandom};
///
/// let settings = GeneratorSettings::from_json(
///     r#"{
///         "password_length": 12,
///         "character_classes": ["digits", "upper_letters"],
///         "generator_flags": ["exclude_look_alike"]
///     }"#,
/// )
/// .unwrap();
///
/// let generator = settings.into_generator(SeededRandom::from_seed(1)).unwrap();
/// let password = generator.generate().unwrap();
/// assert_eq!(password.len(), 12);
/// assert!(!password.contains('O'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub password_length: usize,
    pub character_classes: Vec<ClassName>,
    pub generator_flags: Vec<FlagName>,
    pub characters_pool: Option<String>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            password_length: DEFAULT_PASSWORD_LENGTH,
            character_classes: vec![ClassName::All],
            generator_flags: Vec::new(),
            characters_pool: None,
        }
    }
}

impl GeneratorSettings {
    /// Parses settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CandyError::Settings`] for malformed JSON or unknown names.
    pub fn from_json(json: &str) -> Result<Self, CandyError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CandyError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn character_classes(&self) -> CharacterClass {
        self.character_classes
            .iter()
            .fold(CharacterClass::empty(), |acc, name| acc | (*name).into())
    }

    pub fn generator_flags(&self) -> GeneratorFlag {
        self.generator_flags
            .iter()
            .fold(GeneratorFlag::NONE, |acc, name| acc | (*name).into())
    }

    /// Builds a generator drawing from `random`.
    ///
    /// # Errors
    ///
    /// Same as [`PasswordGeneratorBuilder::build`].
    pub fn into_generator<S: RandomSource>(
        self,
        random: S,
    ) -> Result<PasswordGenerator<S>, CandyError> {
        let mut builder = PasswordGeneratorBuilder::new()
            .password_length(self.password_length)
            .character_classes(self.character_classes())
            .generator_flags(self.generator_flags())
            .random(random);

        if let Some(pool) = &self.characters_pool {
            builder = builder.characters_pool(pool);
        }

        builder.build()
    }
}
