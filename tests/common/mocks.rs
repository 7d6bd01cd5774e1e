//! Mock version of the password generator random source;
use mockall::mock;

use candy_rs::password::RandomSource;

mock! {
    pub Random {}
    impl RandomSource for Random {
        fn next_index(&mut self, bound: usize) -> usize;
    }
}
