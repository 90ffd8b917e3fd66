//! Write a handful of text records to `simple.parquet`.

use parq_format::{write_file, Field, Record, Schema, Value};

fn main() {
    tracing_subscriber::fmt::init();

    println!("Hello World!");

    let schema = Schema::new(vec![Field::utf8("Text")]);
    let records = ["text1", "text2", "text3", "text4", "text5"]
        .into_iter()
        .map(|text| Record::from(vec![Value::Text(text.to_string())]));

    if let Err(e) = write_file("simple.parquet", &schema, records) {
        println!("Error writing file: {}", e);
    }
}
