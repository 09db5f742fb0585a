use comfy_table::{Cell, Table};

use crate::calendar::ALL_LANGUAGES;
use crate::error::Result;
use crate::importer::ALL_DIALECTS;
use crate::settings::{load_settings, settings_path, store_path};
use crate::storage::{has_agreed_disclaimer, JsonFileStore};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let store = JsonFileStore::open(store_path());

    println!("Settings:    {}", settings_path().display());
    println!("Language:    {}", settings.language);
    println!(
        "Disclaimer:  {}",
        if has_agreed_disclaimer(&store) { "accepted" } else { "not accepted" }
    );

    let mut formats = Table::new();
    formats.set_header(vec!["Format", "Description"]);
    for d in ALL_DIALECTS {
        formats.add_row(vec![Cell::new(d.key()), Cell::new(d.name())]);
    }
    println!("\n{formats}");

    let mut languages = Table::new();
    languages.set_header(vec!["Language", "Name", "Months"]);
    for l in ALL_LANGUAGES {
        languages.add_row(vec![
            Cell::new(l.key()),
            Cell::new(l.name()),
            Cell::new(l.months().join(" ")),
        ]);
    }
    println!("\n{languages}");
    Ok(())
}
