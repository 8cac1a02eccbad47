use crate::domain::ports::ProductStore;
use crate::domain::product::Product;

/// An index-based in-memory product list.
///
/// Products live in a `Vec` in insertion order; id lookups scan it, which is
/// fine for the handful of slots a machine has. The highest id ever stored is
/// remembered separately so removing the newest product does not free its id.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductStore {
    products: Vec<Product>,
    last_id: Option<u32>,
}

impl InMemoryProductStore {
    /// Creates a new, empty in-memory product store.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }
}

impl ProductStore for InMemoryProductStore {
    fn all(&self) -> Vec<Product> {
        self.products.clone()
    }

    fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn max_id(&self) -> Option<u32> {
        self.last_id
    }

    fn insert(&mut self, product: Product) {
        self.last_id = self.last_id.max(Some(product.id));
        self.products.push(product);
    }

    fn replace(&mut self, product: Product) -> bool {
        match self.position(product.id) {
            Some(idx) => {
                self.products[idx] = product;
                true
            }
            None => false,
        }
    }

    fn remove_by_name(&mut self, name: &str) -> Option<Product> {
        let idx = self.products.iter().position(|p| p.has_name(name))?;
        Some(self.products.remove(idx))
    }
}
