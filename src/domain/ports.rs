use super::product::Product;

/// Storage for the machine's product list.
///
/// Implementations must preserve insertion order and keep ids unique.
pub trait ProductStore {
    /// Snapshot of all products in insertion order.
    fn all(&self) -> Vec<Product>;
    fn get(&self, id: u32) -> Option<&Product>;
    /// Highest id ever handed out, including removed products.
    fn max_id(&self) -> Option<u32>;
    fn insert(&mut self, product: Product);
    /// Replaces the product with the same id. Returns false if it is missing.
    fn replace(&mut self, product: Product) -> bool;
    /// Removes the first product whose name matches case-insensitively.
    fn remove_by_name(&mut self, name: &str) -> Option<Product>;
}

pub type ProductStoreBox = Box<dyn ProductStore>;

impl<S: ProductStore + ?Sized> ProductStore for Box<S> {
    fn all(&self) -> Vec<Product> {
        (**self).all()
    }

    fn get(&self, id: u32) -> Option<&Product> {
        (**self).get(id)
    }

    fn max_id(&self) -> Option<u32> {
        (**self).max_id()
    }

    fn insert(&mut self, product: Product) {
        (**self).insert(product)
    }

    fn replace(&mut self, product: Product) -> bool {
        (**self).replace(product)
    }

    fn remove_by_name(&mut self, name: &str) -> Option<Product> {
        (**self).remove_by_name(name)
    }
}
