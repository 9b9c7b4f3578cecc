use crate::{
    error::{PhotoshootError, Result},
    models::{slugify, GeneratedImage},
};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

const FILE_PREFIX: &str = "couple-photoshoot";

/// `couple-photoshoot-<theme-slug>-<index + 1>.<ext>`
pub fn file_name(theme_name: &str, index: usize, image: &GeneratedImage) -> String {
    format!(
        "{}-{}-{}.{}",
        FILE_PREFIX,
        slugify(theme_name),
        index + 1,
        image.extension()
    )
}

pub fn archive_name(theme_name: &str) -> String {
    format!("{}-{}.zip", FILE_PREFIX, slugify(theme_name))
}

pub fn save_image(
    dir: impl AsRef<Path>,
    theme_name: &str,
    index: usize,
    image: &GeneratedImage,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name(theme_name, index, image));
    std::fs::write(&path, image.decode()?)?;
    log::info!("💾 Saved {}", path.display());
    Ok(path)
}

/// Zips every image in memory; entries are named like single downloads.
pub fn build_archive(theme_name: &str, images: &[GeneratedImage]) -> Result<Vec<u8>> {
    if images.is_empty() {
        return Err(PhotoshootError::ArchiveError("no images to archive".into()));
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    // Image payloads are already compressed.
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);

    for (index, image) in images.iter().enumerate() {
        let bytes = image
            .decode()
            .map_err(|e| PhotoshootError::ArchiveError(format!("image #{}: {}", index + 1, e)))?;
        writer.start_file(file_name(theme_name, index, image), options)?;
        writer
            .write_all(&bytes)
            .map_err(|e| PhotoshootError::ArchiveError(e.to_string()))?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

pub fn save_archive(
    dir: impl AsRef<Path>,
    theme_name: &str,
    images: &[GeneratedImage],
) -> Result<PathBuf> {
    let archive = build_archive(theme_name, images)?;
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let path = dir.join(archive_name(theme_name));
    std::fs::write(&path, archive)
        .map_err(|e| PhotoshootError::ArchiveError(format!("{}: {}", path.display(), e)))?;
    log::info!("📦 Saved archive {} ({} images)", path.display(), images.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use std::io::Read;

    fn image(prompt: &str, mime: &str, bytes: &[u8]) -> GeneratedImage {
        GeneratedImage {
            prompt: prompt.into(),
            mime_type: mime.into(),
            data: STANDARD.encode(bytes),
        }
    }

    #[test]
    fn test_names_follow_theme_and_index() {
        let png = image("p", "image/png", b"x");
        let jpeg = image("p", "image/jpeg", b"x");
        assert_eq!(
            file_name("Studio Fashion Shoot", 0, &png),
            "couple-photoshoot-studio-fashion-shoot-1.png"
        );
        assert_eq!(
            file_name("Beach Romance", 8, &jpeg),
            "couple-photoshoot-beach-romance-9.jpg"
        );
        assert_eq!(
            archive_name("Rainy Street Hug"),
            "couple-photoshoot-rainy-street-hug.zip"
        );
    }

    #[test]
    fn test_save_image_writes_decoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_image(dir.path(), "Beach Romance", 2, &image("p", "image/png", b"pixels")).unwrap();
        assert_eq!(path.file_name().unwrap(), "couple-photoshoot-beach-romance-3.png");
        assert_eq!(std::fs::read(path).unwrap(), b"pixels");
    }

    #[test]
    fn test_archive_contains_every_image() {
        let images = vec![
            image("a", "image/png", b"first"),
            image("b", "image/png", b"second"),
            image("c", "image/webp", b"third"),
        ];
        let bytes = build_archive("Classic Black & White", &images).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 3);
        let mut entry = archive.by_index(2).unwrap();
        assert_eq!(entry.name(), "couple-photoshoot-classic-black-&-white-3.webp");
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert_eq!(content, b"third");
    }

    #[test]
    fn test_archive_failures() {
        assert!(matches!(
            build_archive("Beach Romance", &[]),
            Err(PhotoshootError::ArchiveError(_))
        ));
        let broken = GeneratedImage {
            prompt: "p".into(),
            mime_type: "image/png".into(),
            data: "not base64 !!".into(),
        };
        let err = build_archive("Beach Romance", &[broken]).unwrap_err();
        assert!(matches!(err, PhotoshootError::ArchiveError(ref m) if m.contains("image #1")));
    }

    #[test]
    fn test_save_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_archive(dir.path(), "Beach Romance", &[image("a", "image/png", b"1")]).unwrap();
        assert!(path.ends_with("couple-photoshoot-beach-romance.zip"));
        assert!(path.exists());
    }
}
