// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message parsing.

mod message;

pub(crate) use message::significant_lines;
pub use message::{CommitMessage, Trailer};
