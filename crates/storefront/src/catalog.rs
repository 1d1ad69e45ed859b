//! In-memory product catalog source.
//!
//! The catalog is an ordered, read-only projection over a product list; this
//! engine never mutates it. Catalog order is load-bearing for the chat
//! fallback's default recommendations (first two products in catalog order).

use walknex_core::{Category, Gender, Price, Product, ProductId, ProductRef, Size};

/// Filter over category, gender, and a case-insensitive search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub gender: Option<Gender>,
    pub search: Option<String>,
}

impl CatalogFilter {
    /// Filter by category only.
    #[must_use]
    pub const fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            gender: None,
            search: None,
        }
    }

    /// Filter by gender only.
    #[must_use]
    pub const fn gender(gender: Gender) -> Self {
        Self {
            category: None,
            gender: Some(gender),
            search: None,
        }
    }

    fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category
            && product.category != category
        {
            return false;
        }
        if let Some(gender) = self.gender
            && product.gender != gender
        {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&needle);
            let in_description = product.description.to_lowercase().contains(&needle);
            if !in_name && !in_description {
                return false;
            }
        }
        true
    }
}

/// An ordered, immutable product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog over an ordered product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products matching `filter`, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Lightweight refs for the first `limit` products matching `filter`.
    #[must_use]
    pub fn recommend(&self, filter: &CatalogFilter, limit: usize) -> Vec<ProductRef> {
        self.filter(filter)
            .into_iter()
            .take(limit)
            .map(product_ref)
            .collect()
    }

    /// The Walknex demo catalog (six shoes), matching the upstream seed data.
    #[must_use]
    pub fn walknex_demo() -> Self {
        Self::new(vec![
            Product {
                id: ProductId::new(1),
                name: "Air Cloud Runner".to_string(),
                price: Price::from_cents(12999),
                category: Category::Running,
                gender: Gender::Men,
                image: "https://images.pexels.com/photos/2529148/pexels-photo-2529148.jpeg"
                    .to_string(),
                sizes: sizes_7_to_12(),
                rating: 4.5,
                reviews: 128,
                in_stock: true,
                description: "The Air Cloud Runner features responsive cushioning and a \
                              breathable mesh upper for maximum comfort during your run."
                    .to_string(),
            },
            Product {
                id: ProductId::new(2),
                name: "Street Force One".to_string(),
                price: Price::from_cents(14999),
                category: Category::Casual,
                gender: Gender::Men,
                image: "https://images.pexels.com/photos/1598505/pexels-photo-1598505.jpeg"
                    .to_string(),
                sizes: sizes_7_to_12(),
                rating: 4.8,
                reviews: 256,
                in_stock: true,
                description: "Classic street style with modern comfort.".to_string(),
            },
            Product {
                id: ProductId::new(3),
                name: "Kids Sport Runner".to_string(),
                price: Price::from_cents(7999),
                category: Category::Running,
                gender: Gender::Kids,
                image: "https://images.pexels.com/photos/1619801/pexels-photo-1619801.jpeg"
                    .to_string(),
                sizes: vec![
                    Size::whole(3),
                    Size::whole(4),
                    Size::whole(5),
                    Size::whole(6),
                ],
                rating: 4.6,
                reviews: 89,
                in_stock: true,
                description: "Comfortable and durable running shoes for active kids.".to_string(),
            },
            Product {
                id: ProductId::new(4),
                name: "Women's Flex Trainer".to_string(),
                price: Price::from_cents(11999),
                category: Category::Running,
                gender: Gender::Women,
                image: "https://images.pexels.com/photos/1464625/pexels-photo-1464625.jpeg"
                    .to_string(),
                sizes: sizes_5_to_9(),
                rating: 4.7,
                reviews: 156,
                in_stock: true,
                description: "Versatile training shoe with responsive cushioning.".to_string(),
            },
            Product {
                id: ProductId::new(5),
                name: "Classic Canvas".to_string(),
                price: Price::from_cents(6999),
                category: Category::Casual,
                gender: Gender::Women,
                image: "https://images.pexels.com/photos/1580267/pexels-photo-1580267.jpeg"
                    .to_string(),
                sizes: sizes_5_to_9(),
                rating: 4.4,
                reviews: 187,
                in_stock: true,
                description: "Timeless canvas design with enhanced comfort.".to_string(),
            },
            Product {
                id: ProductId::new(6),
                name: "Winter Trek Boot".to_string(),
                price: Price::from_cents(19999),
                category: Category::Boots,
                gender: Gender::Men,
                image: "https://images.pexels.com/photos/267242/pexels-photo-267242.jpeg"
                    .to_string(),
                sizes: vec![
                    Size::whole(7),
                    Size::whole(8),
                    Size::whole(9),
                    Size::whole(10),
                    Size::whole(11),
                    Size::whole(12),
                ],
                rating: 4.7,
                reviews: 76,
                in_stock: true,
                description: "Waterproof leather and insulated lining for cold weather \
                              protection."
                    .to_string(),
            },
        ])
    }
}

/// Lightweight recommendation ref for a product.
#[must_use]
pub fn product_ref(product: &Product) -> ProductRef {
    ProductRef {
        id: product.id,
        name: product.name.clone(),
        price: product.price,
        image: product.image.clone(),
    }
}

fn sizes_7_to_12() -> Vec<Size> {
    (7..12)
        .flat_map(|s| [Size::whole(s), Size::half(s)])
        .chain([Size::whole(12)])
        .collect()
}

fn sizes_5_to_9() -> Vec<Size> {
    (5..=9).map(Size::whole).collect()
}
