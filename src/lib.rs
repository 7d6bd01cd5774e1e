#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # Candy for Rust

 A small toolbox of two independent utilities:

 - **Password generation:** a configurable random password generator drawing
   from character classes (lower/upper letters, digits, special characters,
   space) or from an explicit characters pool, plus a heuristic password
   strength estimator.
 - **Sequence paging and chunking:** materialize one page of an ordered
   sequence with its paging metadata, or walk a large source one bounded
   chunk at a time.

 ## Features

| **Feature**   | **Description**                                               |
|---------------|---------------------------------------------------------------|
| rdbc-sqlite   | Enables a SQLite backed `ChunkedSource`                       |
| full          | Enables all available features                                |

 ## Getting Started
 Make sure you activated the suitable features crate on Cargo.toml:

```toml
[dependencies]
candy-rs = { version = "<version>", features = ["<full|rdbc-sqlite>"] }
```

Then, on your main.rs:

```rust
use candy_rs::{
    error::CandyError,
    password::{CharacterClass, GeneratorFlag, PasswordGenerator},
    sequence::{chunk_select_range, PagedExt},
};

fn main() -> Result<(), CandyError> {
    let generator = PasswordGenerator::builder()
        .password_length(16)
        .character_classes(CharacterClass::ALPHA_NUMERIC | CharacterClass::SPECIAL_CHARACTERS)
        .generator_flags(GeneratorFlag::EXCLUDE_LOOK_ALIKE)
        .build()?;

    let password = generator.generate()?;
    assert_eq!(password.chars().count(), 16);

    let page = (0..250).paged(20, 13)?;
    assert_eq!(page.items(), &[247, 248, 249]);

    let numbers: Vec<i32> = (0..250).collect();
    let sum: i32 = chunk_select_range(&numbers, 45)?
        .map(|chunk| chunk.iter().sum::<i32>())
        .sum();
    assert_eq!(sum, 31125);

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Error types
pub mod error;

#[doc(inline)]
pub use error::*;

/// Argument checks shared by the modules
pub mod guard;

/// Password generator and strength estimator
pub mod password;

/// Paged and chunked sequences
pub mod sequence;
