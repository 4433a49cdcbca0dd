//! Statically linked plugin catalog.
//!
//! Stands in for an external plugin loader: the registry only ever sees a list
//! of ready-made [`PluginDescriptor`]s, and this module is where that list comes
//! from. Which entries are offered is controlled by `[plugins] enabled` in the
//! config file.

pub mod trapezoid;

pub use trapezoid::Trapezoid;

use crate::draw::Shape;
use crate::registry::PluginDescriptor;
use log::warn;

type Constructor = fn() -> Box<dyn Shape>;

const CATALOG: &[(&str, Constructor)] = &[(trapezoid::NAME, || Box::new(Trapezoid::default()))];

/// Names of every plugin kind built into this binary.
pub fn catalog() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|(name, _)| *name)
}

/// Descriptor for one catalog entry.
pub fn by_name(name: &str) -> Option<PluginDescriptor> {
    CATALOG
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(entry, create)| PluginDescriptor::new(*entry, *create))
}

/// Descriptors for every catalog entry.
pub fn available() -> Vec<PluginDescriptor> {
    catalog().filter_map(by_name).collect()
}

/// Descriptors for the enabled names; unknown names are logged and skipped.
pub fn load(enabled: &[String]) -> Vec<PluginDescriptor> {
    enabled
        .iter()
        .filter_map(|name| {
            let descriptor = by_name(name);
            if descriptor.is_none() {
                warn!("Plugin '{name}' is not part of this build; skipping");
            }
            descriptor
        })
        .collect()
}
