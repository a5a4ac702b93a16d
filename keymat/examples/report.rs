//! Quarterly sales report example: totals, sorting, and JSON output

use keymat::{Headings, Matrix};

fn main() {
    // Rows are products, columns are quarters. Keys are plain scalars and
    // the matrix need not be rectangular.
    let mut sales = Matrix::new();
    sales.set("widgets", "q1", 120);
    sales.set("widgets", "q2", 80);
    sales.set("gadgets", "q1", 45);
    sales.set("gadgets", "q2", 70);
    sales.set("gizmos", "q2", 15);

    let (rows, cols) = sales.dimensions();
    println!("Populated {rows} products x {cols} quarters, {} cells", sales.cell_count());

    // Synthetic totals: one column per product, one row per quarter
    sales.set_row_totals(|row| row.values().sum::<i32>(), "total");
    sales.set_column_totals(|column| column.values().sum::<i32>(), "all");

    println!("Widgets total: {:?}", sales.get("widgets", "total"));
    println!("Q2 across products: {:?}", sales.get("all", "q2"));

    // Put the strongest quarter first; unmentioned columns are appended
    sales.apply_column_sort(["q2"]);

    let headings = Headings::new("Product")
        .with_row_label("widgets", "Widgets")
        .with_row_label("gadgets", "Gadgets")
        .with_row_label("gizmos", "Gizmos")
        .with_row_label("all", "All products")
        .with_column_label("q1", "Q1")
        .with_column_label("q2", "Q2")
        .with_column_label("total", "Total");

    let records = sales.to_record_set_with_headings(&headings);

    println!("\nRecord set as JSON:");
    match serde_json::to_string_pretty(&records) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("serialization failed: {err}"),
    }
}
