use crate::error::{Error, Result};
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads the whole corpus file into memory.
pub fn load_corpus(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|source| Error::CorpusOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let size = file
        .metadata()
        .map_err(|source| Error::CorpusStat {
            path: path.to_path_buf(),
            source,
        })?
        .len();

    let mut bytes = Vec::with_capacity(size as usize);
    file.read_to_end(&mut bytes)
        .map_err(|source| Error::CorpusRead {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Loaded {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_corpus() {
        let path = std::env::temp_dir().join(format!("bytepair-corpus-{}", std::process::id()));
        fs::write(&path, [0u8, 1, 255, 0]).unwrap();

        let bytes = load_corpus(&path).unwrap();
        assert_eq!(bytes, vec![0, 1, 255, 0]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_corpus() {
        let path = std::env::temp_dir().join("bytepair-no-such-corpus");
        let err = load_corpus(&path).unwrap_err();
        assert!(matches!(err, Error::CorpusOpen { .. }));
        assert!(err.to_string().contains("cannot open corpus"));
    }
}
