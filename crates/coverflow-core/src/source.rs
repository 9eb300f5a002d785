// crates/coverflow-core/src/source.rs
use glam::Vec2;

/// Data source behind a cover flow.
///
/// Content handles are opaque to the layout; they are only carried through
/// to the draw commands so the drawing surface knows what to paint.
pub trait ItemSource {
    type Handle: Clone;

    fn item_count(&self) -> usize;

    fn item_at(&self, index: usize) -> Option<Self::Handle>;

    /// Natural size of the item, used by `LayoutMode::WrapContent`.
    fn intrinsic_size(&self, _index: usize) -> Option<Vec2> {
        None
    }
}

/// Size information the layout engine needs about items.
pub trait ItemMetrics {
    fn intrinsic_size(&self, index: usize) -> Option<Vec2>;
}

impl<S: ItemSource> ItemMetrics for S {
    fn intrinsic_size(&self, index: usize) -> Option<Vec2> {
        ItemSource::intrinsic_size(self, index)
    }
}

/// Metrics for sources that have no intrinsic sizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIntrinsicSize;

impl ItemMetrics for NoIntrinsicSize {
    fn intrinsic_size(&self, _index: usize) -> Option<Vec2> {
        None
    }
}

/// Vector-backed item source.
#[derive(Debug, Clone, Default)]
pub struct ItemList<T> {
    items: Vec<T>,
    sizes: Vec<Option<Vec2>>,
}

impl<T: Clone> ItemList<T> {
    pub fn new(items: Vec<T>) -> Self {
        let sizes = vec![None; items.len()];
        Self { items, sizes }
    }

    pub fn with_sizes(items: Vec<(T, Vec2)>) -> Self {
        let (items, sizes) = items.into_iter().map(|(item, size)| (item, Some(size))).unzip();
        Self { items, sizes }
    }

    pub fn push(&mut self, item: T, size: Option<Vec2>) {
        self.items.push(item);
        self.sizes.push(size);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> ItemSource for ItemList<T> {
    type Handle = T;

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, index: usize) -> Option<T> {
        self.items.get(index).cloned()
    }

    fn intrinsic_size(&self, index: usize) -> Option<Vec2> {
        self.sizes.get(index).copied().flatten()
    }
}
