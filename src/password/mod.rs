//! Password generation and strength estimation.
//!
//! - [`PasswordGenerator`] builds a characters pool from [`CharacterClass`]es
//!   (or takes an explicit one), optionally shuffles it and draws characters
//!   uniformly from an injected [`RandomSource`].
//! - [`estimate_password_strength`] scores an existing password.

/// Character classes, generator flags and pool construction.
pub mod pool;

/// Random sources used by the generator.
pub mod random;

/// The generator itself and its builder.
pub mod generator;

/// Zeroized password buffer.
pub mod secure;

/// JSON settings for the generator.
pub mod settings;

/// Password strength estimation.
pub mod strength;

pub use generator::{PasswordGenerator, PasswordGeneratorBuilder};
pub use pool::{build_pool, CharacterClass, GeneratorFlag};
pub use random::{RandomSource, RngSource, SeededRandom, SharedRandom, ThreadRandom};
pub use secure::SecurePassword;
pub use settings::{ClassName, FlagName, GeneratorSettings};
pub use strength::{analyze_password, estimate_password_strength, StrengthReport};
