//! The render surface boundary.
//!
//! A chart draws into a [`ChartSurface`] hosted by a [`Container`]. The
//! container is owned by the host page (here a [`ContainerRegistry`]) and
//! may be resized at any time; the chart reads its size on every update.

use crate::config::ChartConfig;
use breathscope_core::alloc::HashMap;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

/// One of the two plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Series {
    Ambient,
    Object,
}

impl Series {
    pub const ALL: [Series; 2] = [Series::Ambient, Series::Object];

    /// Position in per-series arrays.
    pub const fn index(self) -> usize {
        match self {
            Series::Ambient => 0,
            Series::Object => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Series::Ambient => "ambient",
            Series::Object => "object",
        }
    }
}

/// Something on the surface whose opacity can be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The stroke of one series (and its head marker).
    Series(Series),
    /// The whole surface.
    Surface,
}

#[derive(Debug)]
struct ContainerState {
    selector: String,
    size: Vec2,
    mounted: usize,
}

/// Shared handle to a host container.
///
/// Clones refer to the same container, so the host can keep one to resize
/// it while a surface holds another.
#[derive(Debug, Clone)]
pub struct Container {
    inner: Rc<RefCell<ContainerState>>,
}

impl Container {
    pub fn new(selector: impl Into<String>, size: Vec2) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ContainerState {
                selector: selector.into(),
                size,
                mounted: 0,
            })),
        }
    }

    pub fn selector(&self) -> String {
        self.inner.borrow().selector.clone()
    }

    /// Current width and height.
    pub fn client_size(&self) -> Vec2 {
        self.inner.borrow().size
    }

    pub fn resize(&self, size: Vec2) {
        self.inner.borrow_mut().size = size;
    }

    /// Number of surfaces currently mounted in this container.
    pub fn mounted_surfaces(&self) -> usize {
        self.inner.borrow().mounted
    }

    /// Record a surface being appended to this container.
    pub fn mount(&self) {
        self.inner.borrow_mut().mounted += 1;
    }

    /// Record a surface being removed from this container.
    pub fn unmount(&self) {
        let mut state = self.inner.borrow_mut();
        state.mounted = state.mounted.saturating_sub(1);
    }

    /// Whether two handles refer to the same container.
    pub fn ptr_eq(&self, other: &Container) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// The host document: containers addressable by selector.
#[derive(Debug, Default)]
pub struct ContainerRegistry {
    containers: HashMap<String, Container>,
}

impl ContainerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a container, replacing any other with the same selector.
    pub fn insert(&mut self, container: Container) -> Option<Container> {
        self.containers.insert(container.selector(), container)
    }

    /// Create and register a container in one step.
    pub fn create(&mut self, selector: &str, size: Vec2) -> Container {
        let container = Container::new(selector, size);
        self.insert(container.clone());
        container
    }

    pub fn resolve(&self, selector: &str) -> Option<Container> {
        self.containers.get(selector).cloned()
    }

    pub fn remove(&mut self, selector: &str) -> Option<Container> {
        self.containers.remove(selector)
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}

/// A vector drawing surface the chart renders into.
///
/// Every setter is a no-op once the surface has been detached.
pub trait ChartSurface {
    /// Create the surface and mount it in `container`.
    fn create(container: Container, config: &ChartConfig) -> Self
    where
        Self: Sized;

    /// Width and height available for drawing. Zero once detached.
    fn client_size(&self) -> Vec2;

    /// Replace the path data of one series.
    fn set_path_data(&mut self, series: Series, data: &str);

    /// Move the head marker of one series; `None` hides it.
    fn set_marker(&mut self, series: Series, at: Option<Vec2>);

    fn set_opacity(&mut self, layer: Layer, opacity: f32);

    /// Uniform scale of the whole surface about its centre.
    fn set_scale(&mut self, scale: f32);

    /// Remove the surface from its container.
    fn detach(&mut self);

    fn is_attached(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_resolves_shared_handle() {
        let mut registry = ContainerRegistry::new();
        let host = registry.create("#breathChart", Vec2::new(800.0, 200.0));

        let resolved = registry.resolve("#breathChart").expect("registered");
        assert!(resolved.ptr_eq(&host));

        host.resize(Vec2::new(400.0, 100.0));
        assert_eq!(resolved.client_size(), Vec2::new(400.0, 100.0));
        assert!(registry.resolve("#missing").is_none());
    }

    #[test]
    fn test_mount_count_never_underflows() {
        let container = Container::new("#chart", Vec2::ONE);
        container.mount();
        container.unmount();
        container.unmount();
        assert_eq!(container.mounted_surfaces(), 0);
    }

    #[test]
    fn test_series_index() {
        assert_eq!(Series::ALL.map(Series::index), [0, 1]);
        assert_eq!(Series::Object.name(), "object");
    }
}
