//! Generate build artifacts

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Load every post once and write the artifacts
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let repo = blog.load()?;
    Generator::new(blog).generate(&repo)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} posts in {:.2}s",
        repo.len(),
        duration.as_secs_f64()
    );

    Ok(())
}
