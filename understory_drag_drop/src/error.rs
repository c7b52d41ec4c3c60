// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time errors.

use alloc::string::String;
use core::fmt;

/// Error returned when drag or drop listeners are configured by name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The listener name is not one the target listener set recognizes.
    UnknownListener {
        /// The offending name.
        name: String,
    },
    /// The same listener name was given more than once.
    DuplicateListener {
        /// The repeated name.
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownListener { name } => write!(f, "{name} is not a known listener"),
            Self::DuplicateListener { name } => write!(f, "{name} is configured more than once"),
        }
    }
}

impl core::error::Error for ConfigError {}
