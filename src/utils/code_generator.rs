//! Short code generation.
//!
//! Codes are drawn at random and carry no uniqueness guarantee on their own.
//! Collisions are detected by the store on write (see
//! [`crate::domain::repositories::WriteMode::CreateOnly`]).

use rand::Rng;
use rand::distr::Alphanumeric;

/// Default number of characters in a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Source of fresh short codes.
///
/// Implementations are pure generators and never consult the store.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random generator over the ASCII alphanumeric alphabet `[0-9A-Za-z]`.
///
/// With the default length of 8 the space is 62^8 (about 2.2e14) codes.
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}
