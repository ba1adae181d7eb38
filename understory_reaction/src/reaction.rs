// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reaction items: identity, label source, and icon source.
//!
//! A [`Reaction`] always carries exactly one label source and exactly one icon
//! source. The enums make the "both set" case unrepresentable; the "neither set"
//! case is rejected by [`ReactionBuilder::build`].
//!
//! ```
//! use understory_reaction::reaction::{Icon, Label, Reaction};
//!
//! let like = Reaction::new(Label::text("Like"), Icon::Image(0x7f08_0001)).with_key("like");
//! let built = Reaction::builder()
//!     .key("like")
//!     .label_text("Like")
//!     .image(0x7f08_0001)
//!     .build()
//!     .unwrap();
//! assert_eq!(like, built);
//! assert!(Reaction::builder().label_text("Love").build().is_err());
//! ```

use alloc::string::String;

use crate::error::Error;

/// Opaque identity of a reaction.
///
/// Used for lookup with [`reaction_by_key`] and for hover/selection identity
/// (see [`Reaction::is_same`]).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ReactionKey {
    /// Numeric identifier.
    Id(u64),
    /// Named identifier.
    Name(String),
}

impl From<u64> for ReactionKey {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ReactionKey {
    fn from(name: &str) -> Self {
        Self::Name(name.into())
    }
}

impl From<String> for ReactionKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Where a reaction's label comes from.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Label {
    /// Literal label text.
    Text(String),
    /// Reference to a localized string resolved by the host.
    Resource(u32),
}

impl Label {
    /// Literal label text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Where a reaction's icon comes from.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Icon {
    /// Reference to a raster image resolved by the host.
    Image(u32),
    /// Name of a vector icon resolved by the host.
    Vector(String),
}

/// A selectable item in the picker.
///
/// Equality is structural over key, label, and icon.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Reaction {
    key: Option<ReactionKey>,
    label: Label,
    icon: Icon,
}

impl Reaction {
    /// Create a reaction without a key.
    pub fn new(label: Label, icon: Icon) -> Self {
        Self {
            key: None,
            label,
            icon,
        }
    }

    /// Start building a reaction whose sources are only known at runtime.
    pub fn builder() -> ReactionBuilder {
        ReactionBuilder::default()
    }

    /// Attach an identity key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<ReactionKey>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Identity key, if any.
    pub fn key(&self) -> Option<&ReactionKey> {
        self.key.as_ref()
    }

    /// Label source.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Icon source.
    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    /// Literal label text, if the label is not a resource reference.
    pub fn label_text(&self) -> Option<&str> {
        match &self.label {
            Label::Text(text) => Some(text),
            Label::Resource(_) => None,
        }
    }

    /// Hover/selection identity.
    ///
    /// When both reactions carry a key the keys decide; otherwise the reactions
    /// are compared structurally.
    pub fn is_same(&self, other: &Self) -> bool {
        match (&self.key, &other.key) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }
}

/// Builder for a [`Reaction`] whose sources are chosen at runtime.
///
/// Setting a source twice replaces the earlier one.
#[derive(Clone, Debug, Default)]
pub struct ReactionBuilder {
    key: Option<ReactionKey>,
    label: Option<Label>,
    icon: Option<Icon>,
}

impl ReactionBuilder {
    /// Set the identity key.
    #[must_use]
    pub fn key(mut self, key: impl Into<ReactionKey>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Use literal label text.
    #[must_use]
    pub fn label_text(mut self, text: impl Into<String>) -> Self {
        self.label = Some(Label::Text(text.into()));
        self
    }

    /// Use a localized string resource as the label.
    #[must_use]
    pub fn label_resource(mut self, id: u32) -> Self {
        self.label = Some(Label::Resource(id));
        self
    }

    /// Use a raster image as the icon.
    #[must_use]
    pub fn image(mut self, id: u32) -> Self {
        self.icon = Some(Icon::Image(id));
        self
    }

    /// Use a named vector icon.
    #[must_use]
    pub fn vector(mut self, name: impl Into<String>) -> Self {
        self.icon = Some(Icon::Vector(name.into()));
        self
    }

    /// Finish the reaction.
    ///
    /// Fails with [`Error::MissingLabel`] or [`Error::MissingIcon`] when a source is absent.
    pub fn build(self) -> Result<Reaction, Error> {
        let label = self.label.ok_or(Error::MissingLabel)?;
        let icon = self.icon.ok_or(Error::MissingIcon)?;
        Ok(Reaction {
            key: self.key,
            label,
            icon,
        })
    }
}

/// Find the first reaction carrying `key`.
pub fn reaction_by_key<'a>(reactions: &'a [Reaction], key: &ReactionKey) -> Option<&'a Reaction> {
    reactions.iter().find(|r| r.key() == Some(key))
}

/// Index of the first reaction with the same identity as `reaction`.
pub(crate) fn position_of(reactions: &[Reaction], reaction: &Reaction) -> Option<usize> {
    reactions.iter().position(|r| r.is_same(reaction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn builder_requires_label_and_icon() {
        assert_eq!(
            Reaction::builder().image(1).build(),
            Err(Error::MissingLabel)
        );
        assert_eq!(
            Reaction::builder().label_resource(7).build(),
            Err(Error::MissingIcon)
        );
        let ok = Reaction::builder()
            .label_resource(7)
            .vector("thumb_up")
            .build()
            .unwrap();
        assert_eq!(ok.label(), &Label::Resource(7));
        assert_eq!(ok.icon(), &Icon::Vector("thumb_up".into()));
        assert_eq!(ok.label_text(), None);
    }

    #[test]
    fn later_source_replaces_earlier() {
        let r = Reaction::builder()
            .label_resource(3)
            .label_text("Haha")
            .vector("laugh")
            .image(9)
            .build()
            .unwrap();
        assert_eq!(r.label_text(), Some("Haha"));
        assert_eq!(r.icon(), &Icon::Image(9));
    }

    #[test]
    fn identity_prefers_keys() {
        let a = Reaction::new(Label::text("Like"), Icon::Image(1)).with_key(1_u64);
        let renamed = Reaction::new(Label::text("Thumbs up"), Icon::Image(2)).with_key(1_u64);
        assert!(a.is_same(&renamed));
        assert_ne!(a, renamed);

        let unkeyed = Reaction::new(Label::text("Like"), Icon::Image(1));
        assert!(!a.is_same(&unkeyed));
        assert!(unkeyed.is_same(&unkeyed.clone()));
    }

    #[test]
    fn lookup_by_key() {
        let list = vec![
            Reaction::new(Label::text("Like"), Icon::Image(1)).with_key("like"),
            Reaction::new(Label::text("Love"), Icon::Image(2)).with_key("love"),
        ];
        let love = reaction_by_key(&list, &"love".into()).unwrap();
        assert_eq!(love.label_text(), Some("Love"));
        assert!(reaction_by_key(&list, &ReactionKey::Id(4)).is_none());
        assert_eq!(position_of(&list, love), Some(1));
    }
}
