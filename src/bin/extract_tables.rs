//! CLI tool for dumping suspected nutrient-table pages of a PDF to JSON

use nutrient_table_dump::{extract_to_file, DumpOptions};
use std::env;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        println!("Usage: {} <pdf_path> <out_json_path>", args[0]);
        process::exit(1);
    }

    let pdf_path = &args[1];
    let out_path = &args[2];

    match extract_to_file(pdf_path, out_path, &DumpOptions::default()) {
        Ok(dump) => {
            println!("Wrote: {}", out_path);
            println!("Pages captured: {}", dump.pages.len());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
