// core/src/seed.rs

//! Sample catalog used by fresh installs and tests.

use tracing::{info, instrument};

use crate::catalog::{insert_category, insert_product};
use crate::db::{begin_write, DbPool};
use crate::error::{StoreError, StoreResult};
use crate::models::{NewCategory, NewProduct};

struct SeedCategory {
  name: &'static str,
  slug: &'static str,
  image_url: &'static str,
}

struct SeedProduct {
  name: &'static str,
  slug: &'static str,
  description: &'static str,
  image_url: &'static str,
  price: f64,
  discount_price: Option<f64>,
  category: &'static str, // category slug
  stock_quantity: i64,
  is_new: bool,
}

const CATEGORIES: &[SeedCategory] = &[
  SeedCategory {
    name: "Clothing",
    slug: "clothing",
    image_url: "https://images.unsplash.com/photo-1434389677669-e08b4cac3105?ixlib=rb-1.2.1&auto=format&fit=crop&w=400&q=80",
  },
  SeedCategory {
    name: "Tableware",
    slug: "tableware",
    image_url: "https://images.unsplash.com/photo-1578749556568-bc2c40e68b61?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
  },
  SeedCategory {
    name: "Kitchen",
    slug: "kitchen",
    image_url: "https://images.unsplash.com/photo-1565183928294-7063f23ce0f8?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
  },
  SeedCategory {
    name: "Home Decor",
    slug: "home-decor",
    image_url: "https://images.unsplash.com/photo-1567016432779-094069958ea5?ixlib=rb-1.2.1&auto=format&fit=crop&w=400&q=80",
  },
];

const PRODUCTS: &[SeedProduct] = &[
  SeedProduct {
    name: "Blue Linen Shirt",
    slug: "blue-linen-shirt",
    description: "Comfortable blue linen shirt perfect for summer days.",
    image_url: "https://images.unsplash.com/photo-1596755094514-f87e34085b2c?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 49.99,
    discount_price: Some(29.99),
    category: "clothing",
    stock_quantity: 25,
    is_new: false,
  },
  SeedProduct {
    name: "Knit Sweater",
    slug: "knit-sweater",
    description: "Warm and cozy knit sweater for cold winter days.",
    image_url: "https://images.unsplash.com/photo-1434389677669-e08b4cac3105?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 50.99,
    discount_price: Some(35.99),
    category: "clothing",
    stock_quantity: 3,
    is_new: false,
  },
  SeedProduct {
    name: "Wool Scarf",
    slug: "wool-scarf",
    description: "Soft wool scarf to keep you warm during the winter.",
    image_url: "https://images.unsplash.com/photo-1520903920243-00d872a2d1c9?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 19.99,
    discount_price: None,
    category: "clothing",
    stock_quantity: 25,
    is_new: true,
  },
  SeedProduct {
    name: "Denim Jacket",
    slug: "denim-jacket",
    description: "Classic denim jacket for a timeless casual look.",
    image_url: "https://images.unsplash.com/photo-1544022613-e87ca75a784a?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 79.99,
    discount_price: Some(59.99),
    category: "clothing",
    stock_quantity: 25,
    is_new: false,
  },
  SeedProduct {
    name: "Cotton T-Shirt",
    slug: "cotton-t-shirt",
    description: "Premium cotton t-shirt for everyday comfort.",
    image_url: "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 24.99,
    discount_price: None,
    category: "clothing",
    stock_quantity: 25,
    is_new: true,
  },
  SeedProduct {
    name: "Leather Belt",
    slug: "leather-belt",
    description: "Genuine leather belt with classic buckle design.",
    image_url: "https://images.unsplash.com/photo-1624222247344-550fb60583dc?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 39.99,
    discount_price: Some(29.99),
    category: "clothing",
    stock_quantity: 25,
    is_new: false,
  },
  SeedProduct {
    name: "Casual Pants",
    slug: "casual-pants",
    description: "Comfortable casual pants for relaxed style.",
    image_url: "https://images.unsplash.com/photo-1473966968600-fa801b869a1a?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 64.99,
    discount_price: Some(49.99),
    category: "clothing",
    stock_quantity: 25,
    is_new: false,
  },
  SeedProduct {
    name: "Winter Coat",
    slug: "winter-coat",
    description: "Warm winter coat for cold weather protection.",
    image_url: "https://images.unsplash.com/photo-1551028719-00167b16eac5?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 129.99,
    discount_price: None,
    category: "clothing",
    stock_quantity: 25,
    is_new: true,
  },
  SeedProduct {
    name: "Ceramic Dinner Set",
    slug: "ceramic-dinner-set",
    description: "Elegant ceramic dinner set for a family of four.",
    image_url: "https://images.unsplash.com/photo-1578749556568-bc2c40e68b61?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 59.99,
    discount_price: Some(44.99),
    category: "tableware",
    stock_quantity: 25,
    is_new: false,
  },
  SeedProduct {
    name: "Crystal Glass Set",
    slug: "crystal-glass-set",
    description: "Elegant crystal glass set for your special occasions.",
    image_url: "https://images.unsplash.com/photo-1589365278144-c9e705f843ba?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 29.99,
    discount_price: None,
    category: "tableware",
    stock_quantity: 25,
    is_new: true,
  },
  SeedProduct {
    name: "Porcelain Tea Set",
    slug: "porcelain-tea-set",
    description: "Fine porcelain tea set with elegant floral design.",
    image_url: "https://images.unsplash.com/photo-1544787219-7f47ccb76574?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 79.99,
    discount_price: Some(59.99),
    category: "tableware",
    stock_quantity: 25,
    is_new: false,
  },
  SeedProduct {
    name: "Stainless Steel Cutlery Set",
    slug: "stainless-steel-cutlery",
    description: "Professional-grade stainless steel cutlery set.",
    image_url: "https://images.pexels.com/photos/262959/pexels-photo-262959.jpeg?auto=compress&cs=tinysrgb&w=500",
    price: 89.99,
    discount_price: Some(69.99),
    category: "tableware",
    stock_quantity: 25,
    is_new: false,
  },
  SeedProduct {
    name: "Bamboo Serving Tray",
    slug: "bamboo-serving-tray",
    description: "Eco-friendly bamboo serving tray for entertaining.",
    image_url: "https://images.unsplash.com/photo-1584473457406-6240486418e9?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 34.99,
    discount_price: None,
    category: "tableware",
    stock_quantity: 25,
    is_new: true,
  },
  SeedProduct {
    name: "Wine Glass Collection",
    slug: "wine-glass-collection",
    description: "Professional wine glass collection for connoisseurs.",
    image_url: "https://images.unsplash.com/photo-1586370434639-0fe43b2d32d6?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 54.99,
    discount_price: Some(39.99),
    category: "tableware",
    stock_quantity: 3,
    is_new: false,
  },
  SeedProduct {
    name: "Premium Cooking Pot Set",
    slug: "premium-cooking-pot-set",
    description: "High-quality stainless steel cooking pot set for all your kitchen needs.",
    image_url: "https://images.pexels.com/photos/932267/pexels-photo-932267.jpeg?auto=compress&cs=tinysrgb&w=500",
    price: 89.99,
    discount_price: Some(69.99),
    category: "kitchen",
    stock_quantity: 25,
    is_new: false,
  },
  SeedProduct {
    name: "Glass Drinkware Collection",
    slug: "glass-drinkware-collection",
    description: "Elegant set of drinking glasses including water, wine, and cocktail glasses.",
    image_url: "https://images.unsplash.com/photo-1514362545857-3bc16c4c7d1b?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=80",
    price: 39.99,
    discount_price: None,
    category: "kitchen",
    stock_quantity: 25,
    is_new: true,
  },
  SeedProduct {
    name: "Ceramic Plate Set",
    slug: "ceramic-plate-set",
    description: "Beautiful ceramic plates for everyday use or special occasions.",
    image_url: "https://images.pexels.com/photos/6270663/pexels-photo-6270663.jpeg?auto=compress&cs=tinysrgb&w=500",
    price: 49.99,
    discount_price: Some(34.99),
    category: "kitchen",
    stock_quantity: 3,
    is_new: false,
  },
  SeedProduct {
    name: "Non-Stick Pan Set",
    slug: "non-stick-pan-set",
    description: "Professional non-stick pan set for perfect cooking.",
    image_url: "https://images.unsplash.com/photo-1556909196-f5f0efbca59c?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 119.99,
    discount_price: Some(89.99),
    category: "kitchen",
    stock_quantity: 25,
    is_new: false,
  },
  SeedProduct {
    name: "Kitchen Knife Set",
    slug: "kitchen-knife-set",
    description: "Professional chef knife set with wooden block.",
    image_url: "https://images.unsplash.com/photo-1593618998160-e34014e67546?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 149.99,
    discount_price: None,
    category: "kitchen",
    stock_quantity: 25,
    is_new: true,
  },
  SeedProduct {
    name: "Wooden Cutting Board",
    slug: "wooden-cutting-board",
    description: "Large bamboo cutting board with groove design.",
    image_url: "https://images.unsplash.com/photo-1571171637578-41bc2dd41cd2?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 29.99,
    discount_price: Some(19.99),
    category: "kitchen",
    stock_quantity: 25,
    is_new: false,
  },
  SeedProduct {
    name: "Electric Coffee Maker",
    slug: "electric-coffee-maker",
    description: "Programmable coffee maker for perfect morning brew.",
    image_url: "https://images.pexels.com/photos/4226804/pexels-photo-4226804.jpeg?auto=compress&cs=tinysrgb&w=500",
    price: 179.99,
    discount_price: None,
    category: "kitchen",
    stock_quantity: 25,
    is_new: true,
  },
  SeedProduct {
    name: "Modern Lamp",
    slug: "modern-lamp",
    description: "Stylish modern lamp to light up your living space.",
    image_url: "https://images.unsplash.com/photo-1507878866276-a947ef722fee?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 49.99,
    discount_price: Some(24.99),
    category: "home-decor",
    stock_quantity: 25,
    is_new: false,
  },
  SeedProduct {
    name: "Ceramic Vase Set",
    slug: "ceramic-vase-set",
    description: "Beautiful ceramic vase set for your home decor.",
    image_url: "https://images.unsplash.com/photo-1434056886845-dac89ffe9b56?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 34.99,
    discount_price: None,
    category: "home-decor",
    stock_quantity: 25,
    is_new: true,
  },
  SeedProduct {
    name: "Cotton Throw Blanket",
    slug: "cotton-throw-blanket",
    description: "Soft cotton throw blanket for your cozy evenings.",
    image_url: "https://images.unsplash.com/photo-1517705008128-361805f42e86?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 24.99,
    discount_price: None,
    category: "home-decor",
    stock_quantity: 25,
    is_new: true,
  },
  SeedProduct {
    name: "Wall Art Canvas Set",
    slug: "wall-art-canvas-set",
    description: "Modern abstract wall art canvas set of three pieces.",
    image_url: "https://images.unsplash.com/photo-1541961017774-22349e4a1262?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 89.99,
    discount_price: Some(69.99),
    category: "home-decor",
    stock_quantity: 25,
    is_new: false,
  },
  SeedProduct {
    name: "Decorative Mirror",
    slug: "decorative-mirror",
    description: "Round decorative mirror with golden frame.",
    image_url: "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 79.99,
    discount_price: Some(59.99),
    category: "home-decor",
    stock_quantity: 25,
    is_new: false,
  },
  SeedProduct {
    name: "Scented Candle Set",
    slug: "scented-candle-set",
    description: "Luxury scented candle set with relaxing fragrances.",
    image_url: "https://images.unsplash.com/photo-1602881915976-8ad28ed8e75e?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 44.99,
    discount_price: None,
    category: "home-decor",
    stock_quantity: 25,
    is_new: true,
  },
  SeedProduct {
    name: "Indoor Plant Collection",
    slug: "indoor-plant-collection",
    description: "Set of three low-maintenance indoor plants with pots.",
    image_url: "https://images.unsplash.com/photo-1416879595882-3373a0480b5b?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80",
    price: 54.99,
    discount_price: None,
    category: "home-decor",
    stock_quantity: 25,
    is_new: true,
  },
];

/// Inserts the sample catalog if the store has no categories yet.
///
/// Returns `true` when rows were written. Runs in one transaction, so a failure
/// leaves the catalog empty rather than half-seeded.
#[instrument(skip(pool))]
pub async fn seed_catalog(pool: &DbPool) -> StoreResult<bool> {
  let mut tx = begin_write(pool).await?;

  let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
    .fetch_one(&mut *tx)
    .await?;
  if existing > 0 {
    info!("Catalog already has {} categories. Skipping seed.", existing);
    return Ok(false);
  }

  let mut category_ids = Vec::with_capacity(CATEGORIES.len());
  for seed in CATEGORIES {
    let category = insert_category(
      &mut tx,
      &NewCategory {
        name: seed.name.to_string(),
        slug: seed.slug.to_string(),
        image_url: seed.image_url.to_string(),
      },
    )
    .await?;
    category_ids.push((seed.slug, category.id));
  }

  for seed in PRODUCTS {
    let category_id = category_ids
      .iter()
      .find(|(slug, _)| *slug == seed.category)
      .map(|(_, id)| *id)
      .ok_or_else(|| StoreError::InvalidReference(format!("Unknown seed category '{}'", seed.category)))?;
    insert_product(
      &mut tx,
      &NewProduct {
        name: seed.name.to_string(),
        slug: seed.slug.to_string(),
        description: seed.description.to_string(),
        image_url: seed.image_url.to_string(),
        price: seed.price,
        discount_price: seed.discount_price,
        category_id,
        stock_quantity: seed.stock_quantity,
        is_new: seed.is_new,
      },
    )
    .await?;
  }

  tx.commit().await?;
  info!(
    "Seeded catalog with {} categories and {} products.",
    CATEGORIES.len(),
    PRODUCTS.len()
  );
  Ok(true)
}
