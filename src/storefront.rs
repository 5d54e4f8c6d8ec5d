//! Storefront fragment: cart summary, order detail and product slideshow.
//!
//! Money is kept in whole cents. The catalog is a fixed seed; there is no
//! cart persistence or payment flow behind these pages.

use serde::Serialize;
use std::fmt;

/// Tax applied on top of the subtotal, in percent.
pub const TAX_PERCENT: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Default)]
pub struct Cents(pub u64);

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = self.0 / 100;
        let cents = self.0 % 100;
        if cents == 0 {
            write!(f, "${dollars}")
        } else {
            write!(f, "${dollars}.{cents:02}")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub slug: String,
    pub title: String,
    pub price: Cents,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Cents {
        Cents(self.product.price.0 * u64::from(self.quantity))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub item_count: u32,
    pub subtotal: Cents,
    pub tax: Cents,
    pub total: Cents,
}

impl OrderSummary {
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let item_count = lines.iter().map(|line| line.quantity).sum();
        let subtotal: u64 = lines.iter().map(|line| line.subtotal().0).sum();
        // Rounded half up to the cent.
        let tax = (subtotal * TAX_PERCENT + 50) / 100;
        Self {
            item_count,
            subtotal: Cents(subtotal),
            tax: Cents(tax),
            total: Cents(subtotal + tax),
        }
    }

    pub fn items_label(&self) -> String {
        if self.item_count == 1 {
            "1 item".to_string()
        } else {
            format!("{} items", self.item_count)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub name: String,
    pub lines: Vec<String>,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: String,
    pub paid: bool,
    pub lines: Vec<CartLine>,
    pub address: Address,
}

impl Order {
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_lines(&self.lines)
    }

    pub fn status_label(&self) -> &'static str {
        if self.paid { "Paid" } else { "Pending payment" }
    }
}

/// Slide settings for the product image carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slideshow {
    pub title: String,
    pub images: Vec<String>,
    pub slides_per_view: u32,
    pub space_between_px: u32,
    pub autoplay_delay_ms: u64,
    /// Autoplay keeps running after the user touches the arrows.
    pub pause_on_interaction: bool,
}

impl Slideshow {
    pub fn for_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            images: product.images.clone(),
            slides_per_view: 1,
            space_between_px: 10,
            autoplay_delay_ms: 3500,
            pause_on_interaction: false,
        }
    }
}

pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn seed() -> Self {
        let product = |slug: &str, title: &str, cents: u64, images: &[&str]| Product {
            slug: slug.to_string(),
            title: title.to_string(),
            price: Cents(cents),
            images: images.iter().map(|image| image.to_string()).collect(),
        };
        Self {
            products: vec![
                product(
                    "chill_crew_neck_sweatshirt",
                    "Chill Crew Neck Sweatshirt",
                    5000,
                    &["1740176-00-A_0_2000.jpg", "1740176-00-A_1.jpg"],
                ),
                product(
                    "quilted_shirt_jacket",
                    "Quilted Shirt Jacket",
                    3000,
                    &["1740507-00-A_0_2000.jpg", "1740507-00-A_1.jpg"],
                ),
                product(
                    "raven_lightweight_zip_up_bomber_jacket",
                    "Raven Lightweight Zip Up Bomber Jacket",
                    2000,
                    &["1740250-00-A_0_2000.jpg", "1740250-00-A_1.jpg"],
                ),
            ],
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.slug == slug)
    }

    /// The fixed cart shown on checkout: one of each seeded product.
    pub fn cart(&self) -> Vec<CartLine> {
        self.products
            .iter()
            .map(|product| CartLine {
                product: product.clone(),
                quantity: 1,
            })
            .collect()
    }

    pub fn order(&self, id: &str, paid: bool) -> Order {
        Order {
            id: id.to_string(),
            paid,
            lines: self.cart(),
            address: delivery_address(),
        }
    }
}

pub fn delivery_address() -> Address {
    Address {
        name: "Julian Quimbayo".to_string(),
        lines: vec![
            "Avenida Prado Alto".to_string(),
            "Barrio Prado Alto".to_string(),
            "Alcaldía de Neiva".to_string(),
            "Neiva - Huila".to_string(),
        ],
        phone: "3158707863".to_string(),
    }
}
