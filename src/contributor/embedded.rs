// SPDX-License-Identifier: MPL-2.0
use super::Contributor;
use crate::resource::LocatedResource;
use rust_embed::RustEmbed;
use std::marker::PhantomData;

/// Contributor backed by a `rust-embed` asset set.
///
/// The asset set lives in the crate that defines the contributor, which is
/// what makes it that contributor's home resource space:
///
/// ```ignore
/// #[derive(RustEmbed)]
/// #[folder = "l10n/"]
/// struct Translations;
///
/// registry.add(Arc::new(EmbeddedContributor::<Translations>::new()));
/// ```
pub struct EmbeddedContributor<A> {
    name: Option<String>,
    _assets: PhantomData<fn() -> A>,
}

impl<A: RustEmbed> EmbeddedContributor<A> {
    pub fn new() -> Self {
        Self {
            name: None,
            _assets: PhantomData,
        }
    }

    /// Overrides the display name used in diagnostics.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Keys of every embedded resource.
    pub fn keys() -> impl Iterator<Item = String> {
        A::iter().map(|key| key.into_owned())
    }
}

impl<A: RustEmbed> Default for EmbeddedContributor<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: RustEmbed> Contributor for EmbeddedContributor<A> {
    fn try_get(&self, path: &str) -> Option<LocatedResource> {
        A::get(path).map(|file| {
            LocatedResource::embedded(
                format!("embedded:{}!/{path}", std::any::type_name::<A>()),
                file.data,
            )
        })
    }

    fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.implementation().to_string())
    }
}
