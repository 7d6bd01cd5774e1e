use std::cell::RefCell;

use log::debug;

use super::{
    pool::{build_pool, CharacterClass, GeneratorFlag},
    random::{RandomSource, ThreadRandom},
    secure::SecurePassword,
    strength,
};
use crate::{error::CandyError, guard};

/// Password length used by [`PasswordGenerator::new`].
pub const DEFAULT_PASSWORD_LENGTH: usize = 10;

/// Shortest password the generator accepts.
pub const MIN_PASSWORD_LENGTH: usize = 2;

/// Password generator.
///
/// The generator keeps its configuration (length, character classes, flags
/// and an optional explicit characters pool) and draws every character from
/// an injected [`RandomSource`]. Each call to [`generate`](Self::generate)
/// rebuilds the pool from the current configuration, so the generator can be
/// reconfigured between calls.
///
/// # Thread Safety
///
/// The random source sits in a `RefCell`, which makes the generator usable
/// through a shared reference on one thread. To share a random state between
/// threads, build each generator with a clone of the same
/// [`SharedRandom`](super::SharedRandom).
///
/// # Examples
///
/// ```
/// use candy_rs::password::{CharacterClass, GeneratorFlag, PasswordGenerator};
///
/// let generator = PasswordGenerator::with_options(
///     25,
///     CharacterClass::DIGITS,
///     GeneratorFlag::SHUFFLE_CHARS,
/// )
/// .unwrap();
///
/// let password = generator.generate().unwrap();
/// assert_eq!(password.len(), 25);
/// assert!(password.chars().all(|c| c.is_ascii_digit()));
/// ```
pub struct PasswordGenerator<S = ThreadRandom> {
    password_length: usize,
    character_classes: CharacterClass,
    generator_flags: GeneratorFlag,
    /// When set, replaces the pool built from the character classes.
    characters_pool: Option<String>,
    random: RefCell<S>,
}

impl PasswordGenerator<ThreadRandom> {
    /// Creates a generator with a length of 10, every character class and no flags.
    pub fn new() -> Self {
        Self::with_random(ThreadRandom)
    }

    /// Creates a generator from explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`CandyError::OutOfRange`] when `password_length` is below 2.
    pub fn with_options(
        password_length: usize,
        character_classes: CharacterClass,
        generator_flags: GeneratorFlag,
    ) -> Result<Self, CandyError> {
        PasswordGeneratorBuilder::new()
            .password_length(password_length)
            .character_classes(character_classes)
            .generator_flags(generator_flags)
            .build()
    }

    pub fn builder() -> PasswordGeneratorBuilder<ThreadRandom> {
        PasswordGeneratorBuilder::new()
    }

    /// See [`strength::estimate_password_strength`].
    pub fn estimate_password_strength(password: &str) -> Result<u32, CandyError> {
        strength::estimate_password_strength(password)
    }
}

impl Default for PasswordGenerator<ThreadRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RandomSource> PasswordGenerator<S> {
    /// Creates a generator with default options drawing from `random`.
    pub fn with_random(random: S) -> Self {
        Self {
            password_length: DEFAULT_PASSWORD_LENGTH,
            character_classes: CharacterClass::ALL,
            generator_flags: GeneratorFlag::NONE,
            characters_pool: None,
            random: RefCell::new(random),
        }
    }

    pub fn password_length(&self) -> usize {
        self.password_length
    }

    /// # Errors
    ///
    /// Returns [`CandyError::OutOfRange`] when `password_length` is below 2.
    pub fn set_password_length(&mut self, password_length: usize) -> Result<(), CandyError> {
        guard::at_least(password_length, MIN_PASSWORD_LENGTH, "password_length")?;
        self.password_length = password_length;
        Ok(())
    }

    pub fn character_classes(&self) -> CharacterClass {
        self.character_classes
    }

    pub fn set_character_classes(&mut self, character_classes: CharacterClass) {
        self.character_classes = character_classes;
    }

    pub fn generator_flags(&self) -> GeneratorFlag {
        self.generator_flags
    }

    pub fn set_generator_flags(&mut self, generator_flags: GeneratorFlag) {
        self.generator_flags = generator_flags;
    }

    pub fn characters_pool(&self) -> Option<&str> {
        self.characters_pool.as_deref()
    }

    /// Sets an explicit characters pool used instead of the character classes.
    ///
    /// # Errors
    ///
    /// Returns [`CandyError::InvalidArgument`] when `pool` is empty.
    pub fn set_characters_pool(&mut self, pool: &str) -> Result<(), CandyError> {
        guard::not_empty(pool, "pool")?;
        self.characters_pool = Some(pool.to_string());
        Ok(())
    }

    /// Drops the explicit pool; the next generation builds it from the classes again.
    pub fn use_default_characters_pool(&mut self) {
        self.characters_pool = None;
    }

    /// Generates a new password.
    ///
    /// # Errors
    ///
    /// Returns [`CandyError::InvalidConfiguration`] when the effective pool is
    /// empty, e.g. no character class selected and no explicit pool set.
    pub fn generate(&self) -> Result<String, CandyError> {
        let mut password = String::with_capacity(self.password_length);
        self.draw(|c| {
            password.push(c);
            Ok(())
        })?;
        Ok(password)
    }

    /// Generates a new password into a buffer zeroized on drop.
    ///
    /// The result is sealed read only when [`GeneratorFlag::MAKE_READ_ONLY`] is set.
    pub fn generate_secure(&self) -> Result<SecurePassword, CandyError> {
        let mut password = SecurePassword::with_capacity(self.password_length);
        self.draw(|c| password.push(c))?;

        if self.generator_flags.contains(GeneratorFlag::MAKE_READ_ONLY) {
            password.make_read_only();
        }

        Ok(password)
    }

    /// Returns `log2(password_length ^ pool_size)` for the effective pool.
    ///
    /// The value is computed as `pool_size * log2(password_length)` so it
    /// stays finite for large pools.
    ///
    /// # Examples
    ///
    /// ```
    /// use candy_rs::password::PasswordGenerator;
    ///
    /// let mut generator = PasswordGenerator::new();
    /// generator.set_characters_pool("0123456789").unwrap();
    /// let entropy = generator.entropy().unwrap();
    /// assert!((entropy - 33.219).abs() < 0.01);
    /// ```
    pub fn entropy(&self) -> Result<f64, CandyError> {
        let pool = self.effective_pool()?;
        Ok(pool.len() as f64 * (self.password_length as f64).log2())
    }

    fn effective_pool(&self) -> Result<Vec<char>, CandyError> {
        let pool: Vec<char> = match self.characters_pool.as_deref() {
            Some(pool) if !pool.is_empty() => pool.chars().collect(),
            _ => build_pool(self.character_classes, self.generator_flags),
        };

        if pool.is_empty() {
            return Err(CandyError::InvalidConfiguration(
                "characters pool is empty, select at least one character class".to_string(),
            ));
        }

        Ok(pool)
    }

    /// Draws `password_length` characters and hands them to `sink` in order.
    fn draw<F>(&self, mut sink: F) -> Result<(), CandyError>
    where
        F: FnMut(char) -> Result<(), CandyError>,
    {
        let mut pool = self.effective_pool()?;
        let mut random = self.random.borrow_mut();

        if self.generator_flags.contains(GeneratorFlag::SHUFFLE_CHARS) {
            shuffle(&mut pool, &mut *random);
        }

        debug!(
            "Generating password of {} chars from a pool of {}",
            self.password_length,
            pool.len()
        );

        for _ in 0..self.password_length {
            sink(pool[random.next_index(pool.len())])?;
        }

        Ok(())
    }
}

/// Fisher–Yates shuffle.
fn shuffle<S: RandomSource + ?Sized>(chars: &mut [char], random: &mut S) {
    for i in (1..chars.len()).rev() {
        let j = random.next_index(i + 1);
        chars.swap(i, j);
    }
}

/// Builder for [`PasswordGenerator`].
///
/// # Examples
///
/// ```
/// use candy_rs::password::{CharacterClass, GeneratorFlag, PasswordGenerator, SeededRandom};
///
/// let generator = PasswordGenerator::builder()
///     .password_length(16)
///     .character_classes(CharacterClass::ALPHA_NUMERIC)
///     .generator_flags(GeneratorFlag::EXCLUDE_LOOK_ALIKE | GeneratorFlag::SHUFFLE_CHARS)
///     .random(SeededRandom::from_seed(7))
///     .build()
///     .unwrap();
///
/// assert_eq!(generator.generate().unwrap().chars().count(), 16);
/// ```
pub struct PasswordGeneratorBuilder<S> {
    password_length: usize,
    character_classes: CharacterClass,
    generator_flags: GeneratorFlag,
    characters_pool: Option<String>,
    random: S,
}

impl PasswordGeneratorBuilder<ThreadRandom> {
    pub fn new() -> Self {
        Self {
            password_length: DEFAULT_PASSWORD_LENGTH,
            character_classes: CharacterClass::ALL,
            generator_flags: GeneratorFlag::NONE,
            characters_pool: None,
            random: ThreadRandom,
        }
    }
}

impl Default for PasswordGeneratorBuilder<ThreadRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RandomSource> PasswordGeneratorBuilder<S> {
    pub fn password_length(mut self, password_length: usize) -> Self {
        self.password_length = password_length;
        self
    }

    pub fn character_classes(mut self, character_classes: CharacterClass) -> Self {
        self.character_classes = character_classes;
        self
    }

    pub fn generator_flags(mut self, generator_flags: GeneratorFlag) -> Self {
        self.generator_flags = generator_flags;
        self
    }

    pub fn characters_pool(mut self, pool: &str) -> Self {
        self.characters_pool = Some(pool.to_string());
        self
    }

    /// Replaces the random source.
    pub fn random<T: RandomSource>(self, random: T) -> PasswordGeneratorBuilder<T> {
        PasswordGeneratorBuilder {
            password_length: self.password_length,
            character_classes: self.character_classes,
            generator_flags: self.generator_flags,
            characters_pool: self.characters_pool,
            random,
        }
    }

    /// # Errors
    ///
    /// Returns [`CandyError::OutOfRange`] for a length below 2 and
    /// [`CandyError::InvalidArgument`] for an empty explicit pool.
    pub fn build(self) -> Result<PasswordGenerator<S>, CandyError> {
        let mut generator = PasswordGenerator::with_random(self.random);
        generator.set_password_length(self.password_length)?;
        generator.set_character_classes(self.character_classes);
        generator.set_generator_flags(self.generator_flags);
        if let Some(pool) = self.characters_pool {
            generator.set_characters_pool(&pool)?;
        }
        Ok(generator)
    }
}
