//! Shape kind registry and plugin intake.

use crate::draw::kinds::{self, Ellipse, Line, Polygon, Polyline, Rectangle};
use crate::draw::Shape;
use crate::error::{DrawError, Result};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fmt;

/// Zero-argument constructor producing a fresh, default-valued shape.
pub type ShapeFactory = Box<dyn Fn() -> Box<dyn Shape>>;

/// A shape kind offered by a plugin source.
pub struct PluginDescriptor {
    pub name: String,
    pub create: ShapeFactory,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>, create: impl Fn() -> Box<dyn Shape> + 'static) -> Self {
        Self {
            name: name.into(),
            create: Box::new(create),
        }
    }
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Outcome of [`ShapeRegistry::accept_plugins`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PluginReport {
    pub accepted: usize,
    pub rejected: usize,
}

/// Maps kind names to shape factories.
///
/// Names keep registration order, built-ins first. The first registration of a
/// name wins: later attempts leave the existing factory in place.
pub struct ShapeRegistry {
    order: Vec<String>,
    factories: HashMap<String, ShapeFactory>,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ShapeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeRegistry")
            .field("kinds", &self.order)
            .finish()
    }
}

impl ShapeRegistry {
    /// Creates a registry with no kinds at all.
    pub fn empty() -> Self {
        Self {
            order: Vec::new(),
            factories: HashMap::new(),
        }
    }

    /// Creates a registry pre-seeded with the five built-in kinds.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        let builtins: [(&str, fn() -> Box<dyn Shape>); 5] = [
            (kinds::LINE, || Box::new(Line::default())),
            (kinds::RECTANGLE, || Box::new(Rectangle::default())),
            (kinds::ELLIPSE, || Box::new(Ellipse::default())),
            (kinds::POLYGON, || Box::new(Polygon::default())),
            (kinds::POLYLINE, || Box::new(Polyline::default())),
        ];
        for (name, factory) in builtins {
            registry.insert(name.to_string(), Box::new(factory));
        }
        registry
    }

    /// Adds a factory under `name`.
    ///
    /// An empty name is an [`DrawError::InvalidAttribute`]. A name that is
    /// already taken leaves the registry unchanged and reports
    /// [`DrawError::DuplicateRegistration`], which callers may ignore.
    pub fn register(&mut self, name: &str, factory: ShapeFactory) -> Result<()> {
        if name.trim().is_empty() {
            return Err(DrawError::InvalidAttribute(
                "shape kind name must not be empty".to_string(),
            ));
        }
        if self.factories.contains_key(name) {
            debug!("ignoring second registration of '{name}'");
            return Err(DrawError::DuplicateRegistration(name.to_string()));
        }
        self.insert(name.to_string(), factory);
        debug!("registered shape kind '{name}'");
        Ok(())
    }

    /// Creates a fresh default shape of kind `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn Shape>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| DrawError::UnknownKind(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Kind names in registration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registers every descriptor it can and reports how many made it in.
    ///
    /// Descriptors with an empty name or a name that is already registered
    /// are rejected.
    pub fn accept_plugins(&mut self, plugins: Vec<PluginDescriptor>) -> PluginReport {
        let mut report = PluginReport::default();
        for plugin in plugins {
            match self.register(&plugin.name, plugin.create) {
                Ok(()) => report.accepted += 1,
                Err(err) => {
                    warn!("Rejected plugin shape kind: {err}");
                    report.rejected += 1;
                }
            }
        }
        if report.accepted > 0 {
            info!(
                "Loaded {} plugin shape kind(s), {} rejected",
                report.accepted, report.rejected
            );
        }
        report
    }

    fn insert(&mut self, name: String, factory: ShapeFactory) {
        self.order.push(name.clone());
        self.factories.insert(name, factory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RED;
    use crate::util::{Point, Rect};

    #[test]
    fn builtins_come_first_in_order() {
        let registry = ShapeRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            &["Line", "Rectangle", "Ellipse", "Polygon", "Polyline"]
        );
        for name in registry.names() {
            assert_eq!(registry.create(name).unwrap().kind(), name);
        }
    }

    #[test]
    fn create_returns_fresh_default_shapes() {
        let registry = ShapeRegistry::with_builtins();
        let mut first = registry.create("Rectangle").unwrap();
        first.set_bounds(Rect::new(1.0, 2.0, 3.0, 4.0));
        first.set_stroke_color(RED);

        let second = registry.create("Rectangle").unwrap();
        assert_eq!(second.bounds(), Rect::default());
        assert_ne!(second.stroke_color(), RED);
    }

    #[test]
    fn first_registration_wins() {
        let mut registry = ShapeRegistry::with_builtins();
        let result = registry.register(
            "Rectangle",
            Box::new(|| -> Box<dyn Shape> {
                Box::new(Polyline::new(
                    vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
                    Default::default(),
                ))
            }),
        );
        assert!(matches!(result, Err(DrawError::DuplicateRegistration(_))));
        assert_eq!(registry.create("Rectangle").unwrap().kind(), "Rectangle");
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn unknown_kind_is_reported() {
        let registry = ShapeRegistry::with_builtins();
        assert!(matches!(
            registry.create("Star"),
            Err(DrawError::UnknownKind(name)) if name == "Star"
        ));
    }

    #[test]
    fn accept_plugins_counts_rejections() {
        let mut registry = ShapeRegistry::with_builtins();
        let report = registry.accept_plugins(vec![
            PluginDescriptor::new("Blob", || Box::new(Ellipse::default())),
            PluginDescriptor::new("", || Box::new(Ellipse::default())),
            PluginDescriptor::new("Line", || Box::new(Ellipse::default())),
            PluginDescriptor::new("Blob", || Box::new(Rectangle::default())),
        ]);
        assert_eq!(report, PluginReport { accepted: 1, rejected: 3 });
        assert_eq!(registry.names().last().map(String::as_str), Some("Blob"));
        assert!(registry.contains("Blob"));
    }
}
