// SPDX-License-Identifier: MPL-2.0
use crate::bundle::{BundleMerger, Properties};
use crate::host::BundleFactory;

/// Bundle strategy that overlays contributed bundles on every load.
pub struct OverrideBundleFactory {
    merger: BundleMerger,
}

impl OverrideBundleFactory {
    pub fn new(merger: BundleMerger) -> Self {
        Self { merger }
    }
}

impl BundleFactory for OverrideBundleFactory {
    fn wrap_up(&self, base_name: &str, locale: &str, mut props: Properties) -> Properties {
        self.merger.merge_into(base_name, locale, &mut props);
        props
    }
}
