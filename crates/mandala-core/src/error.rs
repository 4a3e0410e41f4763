// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the governor's control boundary.

use std::fmt::Display;

/// A specialized `Result` type for governor control operations.
pub type GovernorResult<T> = Result<T, GovernorError>;

/// An error raised at the governor's control boundary.
///
/// The governor itself degrades gracefully rather than failing; these
/// errors only occur when an operator-facing call carries bad input or
/// the governor it addresses is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GovernorError {
    /// A pin request named a tier that does not exist.
    UnknownTier(String),
    /// A feature query named a feature outside the closed set.
    UnknownFeature(String),
    /// A control command was sent after the governor shut down.
    ControlChannelClosed,
    /// The control buffer is full; the command was rejected, not queued.
    ControlBacklogFull,
}

impl Display for GovernorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GovernorError::UnknownTier(name) => write!(f, "Unknown performance tier: {name}"),
            GovernorError::UnknownFeature(name) => write!(f, "Unknown visual feature: {name}"),
            GovernorError::ControlChannelClosed => {
                write!(f, "Governor control channel is closed")
            }
            GovernorError::ControlBacklogFull => {
                write!(f, "Governor control backlog is full")
            }
        }
    }
}

impl std::error::Error for GovernorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = GovernorError::UnknownTier("warp".into());
        assert_eq!(err.to_string(), "Unknown performance tier: warp");

        let err = GovernorError::UnknownFeature("bloom".into());
        assert_eq!(err.to_string(), "Unknown visual feature: bloom");
    }

    #[test]
    fn test_error_implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(GovernorError::ControlChannelClosed);
        assert!(err.to_string().contains("control channel"));
    }
}
