//! Console menu layer. Owns all interaction and display. Domain errors
//! (unknown product, insufficient stock, invalid range, empty cart) are
//! displayed and the loop continues; only actor communication failures
//! abort the session.

use std::io::{self, Write};

use console::style;

use crate::app_system::{OrderLog, ShopSystem, LOW_STOCK_THRESHOLD};
use crate::catalog::{CatalogError, StockAlert};
use crate::domain::{CartError, Customer, Product};

/// Top-level menu loop. Returns when the user exits or stdin is closed.
pub async fn run(
    system: &ShopSystem,
    customer: &mut Customer,
    order_log: &mut OrderLog,
) -> Result<(), CatalogError> {
    loop {
        print_header("Main menu");
        println!("User: {}", customer.name);
        println!(
            "Cart: {} items for {}\n",
            customer.cart().lines().len(),
            customer.cart().total_price()
        );
        println!("1. Catalog");
        println!("2. Search");
        println!("3. Cart");
        println!("4. Orders");
        println!("5. Settings");
        println!("6. Save last order");
        println!("7. Exit");

        match read_choice(1, 7) {
            None | Some(7) => return Ok(()),
            Some(1) => browse_catalog(system, customer).await?,
            Some(2) => search_menu(system, customer).await?,
            Some(3) => show_cart(customer, order_log),
            Some(4) => show_orders(customer),
            Some(5) => edit_settings(customer),
            Some(6) => save_last_order(customer, order_log),
            Some(_) => {}
        }
    }
}

/// Displays startup (or any other) stock alerts.
pub fn print_alerts(alerts: &[StockAlert]) {
    for alert in alerts {
        println!("{} {}", style("[!]").yellow(), style(alert).yellow());
    }
}

async fn browse_catalog(
    system: &ShopSystem,
    customer: &mut Customer,
) -> Result<(), CatalogError> {
    loop {
        print_header("Catalog");

        let groups = system.catalog_by_category().await?;
        if groups.is_empty() {
            println!("The catalog is empty");
            return Ok(());
        }

        let mut max_id = 0;
        for (category, products) in &groups {
            println!("\n{}", style(category).bold());
            for product in products {
                print_product(product);
                max_id = max_id.max(product.id);
            }
        }

        println!("\n0. Back");
        println!("Product ID - add to cart");

        match read_choice(0, max_id) {
            None | Some(0) => return Ok(()),
            Some(id) => match system.find_product(id).await? {
                Some(product) => prompt_add_to_cart(system, customer, &product).await?,
                None => println!("No product with id {}", id),
            },
        }
    }
}

async fn prompt_add_to_cart(
    system: &ShopSystem,
    customer: &mut Customer,
    product: &Product,
) -> Result<(), CatalogError> {
    if product.quantity == 0 {
        println!("{} {} is out of stock", style("✗").red(), product.name);
        return Ok(());
    }

    println!("Quantity (up to {}):", product.quantity);
    let Some(quantity) = read_choice(1, product.quantity) else {
        return Ok(());
    };

    match system.add_to_cart(customer, product.id, quantity).await {
        Ok(change) => {
            println!("{} {}", style("✓").green(), change);
            // Level-triggered alerting: every scan re-reports all products
            // at or below the threshold, not just the one that crossed it.
            let alerts = system.check_low_stock().await?;
            print_alerts(&alerts);
        }
        Err(err @ CatalogError::ActorCommunicationError(_)) => return Err(err),
        Err(err) => println!("{} {}", style("✗").red(), err),
    }
    Ok(())
}

async fn search_menu(system: &ShopSystem, customer: &mut Customer) -> Result<(), CatalogError> {
    print_header("Search");
    println!("1. By name");
    println!("2. By price range");
    println!("0. Back");

    match read_choice(0, 2) {
        Some(1) => search_by_name(system, customer).await,
        Some(2) => filter_by_price(system).await,
        _ => Ok(()),
    }
}

async fn search_by_name(
    system: &ShopSystem,
    customer: &mut Customer,
) -> Result<(), CatalogError> {
    print!("Search: ");
    let _ = io::stdout().flush();
    let Some(query) = read_line() else {
        return Ok(());
    };

    let results = system.search(query).await?;
    if results.is_empty() {
        println!("Nothing found");
        return Ok(());
    }

    let mut max_id = 0;
    for product in &results {
        print_product(product);
        max_id = max_id.max(product.id);
    }

    println!("\nAdd product to cart (ID or 0 to go back):");
    if let Some(id) = read_choice(0, max_id) {
        if id > 0 {
            match results.iter().find(|p| p.id == id) {
                Some(product) => {
                    let product = product.clone();
                    prompt_add_to_cart(system, customer, &product).await?;
                }
                None => println!("No matching product with id {}", id),
            }
        }
    }
    Ok(())
}

async fn filter_by_price(system: &ShopSystem) -> Result<(), CatalogError> {
    let Some(min) = read_price("Minimum price: ") else {
        return Ok(());
    };
    let Some(max) = read_price("Maximum price: ") else {
        return Ok(());
    };

    match system.filter_by_price(min, max).await {
        Ok(results) if results.is_empty() => println!("Nothing in that range"),
        Ok(results) => {
            for product in &results {
                print_product(product);
            }
        }
        Err(err @ CatalogError::ActorCommunicationError(_)) => return Err(err),
        Err(err) => println!("{} {}", style("✗").red(), err),
    }
    pause();
    Ok(())
}

fn show_cart(customer: &mut Customer, order_log: &mut OrderLog) {
    loop {
        print_header("Your cart");

        if customer.cart().is_empty() {
            println!("Cart is empty");
        } else {
            for item in customer.cart().lines() {
                println!(
                    "{} ({}) x{} = {}",
                    item.name,
                    item.category,
                    item.quantity,
                    item.line_total()
                );
            }
            println!("\nTotal: {}", customer.cart().total_price());
        }

        println!("\n1. Place order");
        println!("2. Clear cart");
        println!("0. Back");

        match read_choice(0, 2) {
            Some(1) => {
                checkout(customer, order_log);
                return;
            }
            Some(2) => {
                let change = customer.cart_mut().clear();
                println!("{} {}", style("[Cart]").magenta(), change);
            }
            _ => return,
        }
    }
}

fn checkout(customer: &mut Customer, order_log: &mut OrderLog) {
    print!("Your name [{}]: ", customer.name);
    let _ = io::stdout().flush();
    if let Some(name) = read_line() {
        if !name.is_empty() {
            customer.name = name;
        }
    }

    match customer.place_order() {
        Ok(order) => {
            println!("\n{} Order #{} placed!", style("✓").green(), order.id());
            println!("Total: {}", order.total());

            println!("Save order to file? (1 - yes / 0 - no):");
            if read_choice(0, 1) == Some(1) {
                save_last_order(customer, order_log);
            }
        }
        Err(CartError::Empty) => println!("{} Cart is empty!", style("✗").red()),
    }
}

fn save_last_order(customer: &Customer, order_log: &mut OrderLog) {
    if customer.orders().is_empty() {
        println!("No orders yet");
        return;
    }

    match order_log.append_last_order(customer) {
        Ok(()) => println!(
            "{} Order saved to {}",
            style("✓").green(),
            order_log.path().display()
        ),
        Err(err) => println!("{} Failed to save order: {}", style("✗").red(), err),
    }
}

fn show_orders(customer: &Customer) {
    print_header("My orders");

    if customer.orders().is_empty() {
        println!("You have no orders yet");
    } else {
        for order in customer.orders() {
            println!("{}", order);
        }
    }
    pause();
}

fn edit_settings(customer: &mut Customer) {
    print_header("Settings");
    println!("Customer #{}", customer.id);
    println!("Blank input keeps the current value.");

    let fields: [(&str, &mut String); 4] = [
        ("Name", &mut customer.name),
        ("Phone", &mut customer.phone),
        ("Address", &mut customer.address),
        ("Email", &mut customer.email),
    ];

    for (label, value) in fields {
        print!("{} [{}]: ", label, value);
        let _ = io::stdout().flush();
        match read_line() {
            Some(input) if !input.is_empty() => *value = input,
            Some(_) => {}
            None => return,
        }
    }

    println!("{} Profile updated", style("✓").green());
}

fn print_header(title: &str) {
    println!("\n{}", style(format!("=== {} ===", title)).cyan());
}

fn print_product(product: &Product) {
    let row = format!(
        "[{}] {:<25} | {:<15} | {:>8} | {:>3} pcs",
        product.id, product.name, product.category, product.price, product.quantity
    );
    if product.quantity <= LOW_STOCK_THRESHOLD {
        println!("{}", style(row).yellow());
    } else {
        println!("{}", style(row).green());
    }
}

/// One trimmed line from stdin; `None` once stdin is closed.
fn read_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Reads an integer choice within the inclusive range, re-prompting with a
/// bounds message on invalid input. `None` once stdin is closed.
fn read_choice(min: u32, max: u32) -> Option<u32> {
    loop {
        print!("\nYour choice: ");
        let _ = io::stdout().flush();
        let line = read_line()?;
        match line.parse::<u32>() {
            Ok(choice) if choice >= min && choice <= max => return Some(choice),
            _ => println!("Enter a number between {} and {}", min, max),
        }
    }
}

fn read_price(prompt: &str) -> Option<f64> {
    loop {
        print!("{}", prompt);
        let _ = io::stdout().flush();
        let line = read_line()?;
        match line.parse::<f64>() {
            Ok(price) => return Some(price),
            Err(_) => println!("Enter a price"),
        }
    }
}

fn pause() {
    print!("\nPress Enter to continue");
    let _ = io::stdout().flush();
    let _ = read_line();
}
