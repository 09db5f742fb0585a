use crate::calendar::CalendarLanguage;
use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path};

pub fn run(language: Option<&str>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(lang) = language {
        let parsed: CalendarLanguage = lang.parse()?;
        settings.language = parsed.key().to_string();
    }

    save_settings(&settings)?;
    println!("Saved settings to {}", settings_path().display());
    Ok(())
}
