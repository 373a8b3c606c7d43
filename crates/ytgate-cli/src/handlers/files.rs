//! Files command handler.

use anyhow::Result;
use ytgate_core::ArtifactEntry;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Render artifacts as an aligned table.
pub fn render(entries: &[ArtifactEntry]) -> String {
    if entries.is_empty() {
        return "No files in download directory.".to_string();
    }

    let width = entries
        .iter()
        .map(|e| e.filename.chars().count())
        .max()
        .unwrap_or(0)
        .max("FILENAME".len());

    let mut out = format!("{:<width$}  {:>10}  CREATED\n", "FILENAME", "SIZE");
    for entry in entries {
        let created = entry
            .created
            .map_or_else(|| "-".to_string(), |c| c.format("%Y-%m-%d %H:%M:%S").to_string());
        out.push_str(&format!(
            "{:<width$}  {:>10}  {}\n",
            entry.filename, entry.size, created
        ));
    }
    out
}

/// List artifacts currently in the download directory.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let entries = ctx.gateway().list().await.map_err(CliError::from)?;
    print!("{}", render(&entries));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listing() {
        assert_eq!(render(&[]), "No files in download directory.");
    }

    #[test]
    fn rows_are_aligned() {
        let entries = vec![
            ArtifactEntry::new("a.mp3".into(), 1_048_576, None),
            ArtifactEntry::new("longer-name.mp4".into(), 0, None),
        ];
        let out = render(&entries);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("FILENAME"));
        assert!(lines[1].starts_with("a.mp3 "));
        assert!(lines[1].contains("1.00 MB"));
        assert_eq!(lines[1].len(), lines[2].len());
    }
}
