// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by picker construction and anchor attachment.
//!
//! Only construction-time preconditions and protocol misuse are errors.
//! Best-effort conditions, such as dismissing when nothing is open or tracking the
//! pointer before dragging is armed, are silently ignored by the engine.

/// Errors produced by this crate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// A picker state was created with an empty reaction list.
    #[error("at least one reaction should be provided")]
    EmptyReactions,
    /// A reaction was built without a label source.
    #[error("reaction has no label: provide either label text or a string resource")]
    MissingLabel,
    /// A reaction was built without an icon source.
    #[error("reaction has no icon: provide either an image resource or a vector icon")]
    MissingIcon,
    /// An anchor was attached without a hosting [`PickerHost`](crate::registry::PickerHost).
    #[error("cannot attach reaction picker anchor: no PickerHost was provided for it")]
    MissingHost,
}
