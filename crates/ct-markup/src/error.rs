// SPDX-License-Identifier: MIT
//
// Configuration errors. The transformation stages themselves never fail:
// an unmatched pattern or an unknown color name is a no-op, not an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("'{0}' cannot be used as a custom delimiter character")]
    InvalidDelimiter(char),

    #[error("a delimiter must be exactly one character, got {0:?}")]
    DelimiterLength(String),
}

pub type Result<T> = std::result::Result<T, Error>;
