//! The fixed startup catalog. Supplied verbatim to the shop system, which
//! assigns ids in list order (1..=8).

use crate::domain::ProductCreate;

pub fn initial_products() -> Vec<ProductCreate> {
    vec![
        ProductCreate::new("iPhone 15 Pro", 45999.0, 10, "Smartphones"),
        ProductCreate::new("Samsung Galaxy S23", 34999.0, 15, "Smartphones"),
        ProductCreate::new("Xiaomi 13 Pro", 28999.0, 8, "Smartphones"),
        ProductCreate::new("PlayStation 5", 20999.0, 3, "Consoles"),
        ProductCreate::new("Xbox Series X", 19999.0, 4, "Consoles"),
        ProductCreate::new("LG Refrigerator", 48999.0, 7, "Refrigerators"),
        ProductCreate::new("Dyson Vacuum Cleaner", 25999.0, 9, "Vacuum Cleaners"),
        ProductCreate::new("MacBook Pro M3", 74999.0, 4, "Laptops"),
    ]
}
