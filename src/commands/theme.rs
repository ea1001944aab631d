//! Theme preference

use anyhow::Result;

use crate::store::ThemePreference;
use crate::Blog;

/// Print the stored theme, or store a new one (`light`, `dark` or `toggle`)
pub fn run(blog: &Blog, value: Option<&str>) -> Result<()> {
    let mut store = blog.store();
    let current = ThemePreference::load(&store);

    let Some(value) = value else {
        println!("{}", current.as_str());
        return Ok(());
    };

    let next = match value {
        "toggle" => current.toggled(),
        other => match ThemePreference::parse(other) {
            Some(theme) => theme,
            None => anyhow::bail!("Unknown theme: {}. Available: light, dark, toggle", other),
        },
    };

    next.save(&mut store);
    println!("{}", next.as_str());
    Ok(())
}
