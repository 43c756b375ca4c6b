use anyhow::Result;
use owo_colors::OwoColorize;
use vaxtrack_core::config::TrackerConfig;

pub fn run() -> Result<()> {
    let config_path = TrackerConfig::config_path()?;
    let config = TrackerConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", config.data_path().display());

    println!();
    println!("{}", "Settings".bold());
    println!(
        "  Default child:  {}",
        config.default_child.as_deref().unwrap_or("(latest added)")
    );
    println!("  Date format:    {}", config.date_format);

    Ok(())
}
