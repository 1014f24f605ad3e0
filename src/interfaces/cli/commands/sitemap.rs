//! `nestlead sitemap --out DIR`

use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::interfaces::cli::CliError;
use crate::seo::SeoArtifact;

/// 渲染全部 SEO 文件并写入目录，返回写入的路径
pub fn write_artifacts(
    store: &ContentStore,
    site: &SiteConfig,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, CliError> {
    std::fs::create_dir_all(out_dir)?;

    SeoArtifact::ALL
        .into_iter()
        .map(|artifact| -> Result<PathBuf, CliError> {
            let body = artifact.render(store, site)?;
            let path = out_dir.join(artifact.file_name());
            std::fs::write(&path, body)?;
            Ok(path)
        })
        .collect()
}

pub async fn write_sitemaps(out: String) -> Result<(), CliError> {
    let config = crate::config::get_config();
    let store = ContentStore::from_config();

    println!(
        "{} {}",
        "Writing sitemaps to".yellow(),
        out.as_str().blue()
    );

    let written = tokio::task::spawn_blocking(move || {
        write_artifacts(&store, &config.site, Path::new(&out))
    })
    .await
    .map_err(|e| CliError::CommandError(format!("Sitemap task failed: {}", e)))??;

    for path in written {
        println!("  {} {}", "wrote".green(), path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_write_artifacts_creates_all_files() {
        let content = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let target = out.path().join("public");

        let store = ContentStore::new(content.path(), Duration::from_secs(60), 10);
        let written = write_artifacts(&store, &SiteConfig::default(), &target).unwrap();

        assert_eq!(written.len(), SeoArtifact::ALL.len());
        let robots = std::fs::read_to_string(target.join("robots.txt")).unwrap();
        assert!(robots.contains("Sitemap: http://localhost:8080/sitemap.xml"));
        assert!(target.join("sitemap-areas.xml").exists());
    }
}
