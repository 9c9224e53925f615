//! 論文ファイルの読み込み

use crate::error::{Result, ScholarError};
use scholar_pulse_common::{PaperFile, PaperSource};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// パスから PaperFile を作る（本体はまだ読まない）
///
/// メディアタイプは拡張子から判定する。PDFかどうかの検証はセッション側で行う。
pub async fn open_paper(path: &Path) -> Result<PaperFile> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|_| ScholarError::FileNotFound(path.display().to_string()))?;
    if !metadata.is_file() {
        return Err(ScholarError::FileNotFound(path.display().to_string()));
    }

    let file = PaperFile::from_path(path, metadata.len());
    debug!(name = %file.name, size = file.size, media_type = %file.media_type, "opened paper");
    if file.exceeds_recommended_size() {
        warn!(name = %file.name, size = file.size, "file exceeds the recommended 20MB limit");
    }
    Ok(file)
}

/// ファイル本体を読み込む
pub async fn read_paper(file: &PaperFile) -> Result<Arc<[u8]>> {
    match &file.source {
        PaperSource::Memory(bytes) => Ok(Arc::clone(bytes)),
        PaperSource::Path(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| ScholarError::FileRead(format!("{}: {}", file.name, e)))?;
            Ok(Arc::from(bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_and_read_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("paper.pdf");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"%PDF-1.4 test").unwrap();

        let file = open_paper(&path).await.unwrap();
        assert_eq!(file.name, "paper.pdf");
        assert_eq!(file.media_type, "application/pdf");
        assert_eq!(file.size, 13);

        let bytes = read_paper(&file).await.unwrap();
        assert_eq!(&bytes[..], b"%PDF-1.4 test");
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let err = open_paper(Path::new("/nonexistent/paper.pdf")).await.unwrap_err();
        assert!(matches!(err, ScholarError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_open_directory_is_not_a_paper() {
        let dir = TempDir::new().unwrap();
        let err = open_paper(dir.path()).await.unwrap_err();
        assert!(matches!(err, ScholarError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_read_deleted_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.pdf");
        std::fs::write(&path, b"%PDF").unwrap();
        let file = open_paper(&path).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        let err = read_paper(&file).await.unwrap_err();
        assert!(matches!(err, ScholarError::FileRead(_)));
        assert!(err.to_string().starts_with("Failed to read the file: gone.pdf"));
    }

    #[tokio::test]
    async fn test_read_memory_source() {
        let file = PaperFile::from_bytes("drop.pdf", "application/pdf", Arc::from(&b"%PDF"[..]));
        let bytes = read_paper(&file).await.unwrap();
        assert_eq!(&bytes[..], b"%PDF");
    }
}
