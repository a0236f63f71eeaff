use madang_core::{BookRef, CustomerRef, Prerequisites};
use madang_generate::{BatchSize, GenerateOptions, SeedEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let engine = SeedEngine::new(GenerateOptions {
        seed: Some(42),
        ..GenerateOptions::default()
    })?;

    let books = engine.synthesize_books(BatchSize::from(3));
    for book in &books {
        println!("book  {:<40} {:<12} {}", book.title, book.publisher, book.price);
    }

    let prereqs = Prerequisites::new(
        books
            .iter()
            .zip(1..)
            .map(|(book, id)| BookRef {
                id,
                list_price: book.price,
            })
            .collect(),
        (1..=4).map(|id| CustomerRef { id }).collect(),
    );
    for order in engine.synthesize_orders(BatchSize::from(10), &prereqs)? {
        println!(
            "order cust={} book={} price={} date={}",
            order.customer_id, order.book_id, order.sale_price, order.order_date
        );
    }
    Ok(())
}
