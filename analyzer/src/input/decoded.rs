//! Decoded block records stored as JSON lines, one record per line.

use anyhow::Context;
use sbfcore::records::BlockRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Opens a decoded-record file. Blank lines and `#` comments are skipped; a
/// malformed line surfaces as an error item so the load can be abandoned.
pub fn open_records(
    path: &Path,
) -> anyhow::Result<impl Iterator<Item = anyhow::Result<BlockRecord>>> {
    let file = File::open(path)
        .with_context(|| format!("opening decoded records {}", path.display()))?;
    let name = path.display().to_string();

    Ok(BufReader::new(file)
        .lines()
        .enumerate()
        .filter_map(move |(idx, line)| {
            let line = match line.with_context(|| format!("reading {} line {}", name, idx + 1)) {
                Ok(line) => line,
                Err(err) => return Some(Err(err)),
            };
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            Some(
                serde_json::from_str::<BlockRecord>(trimmed)
                    .with_context(|| format!("parsing {} line {}", name, idx + 1)),
            )
        }))
}

pub fn write_records(path: &Path, records: &[BlockRecord]) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating decoded records {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record).context("encoding decoded record")?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbfcore::records::EventRecord;
    use tempfile::tempdir;

    #[test]
    fn records_survive_a_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mission.jsonl");
        let records = vec![
            BlockRecord::Event(EventRecord { tow: 1042, wnc: 2100 }),
            BlockRecord::Event(EventRecord { tow: 2042, wnc: 2100 }),
        ];
        write_records(&path, &records).unwrap();

        let loaded: Vec<BlockRecord> = open_records(&path)
            .unwrap()
            .collect::<anyhow::Result<_>>()
            .unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn malformed_line_yields_error_item() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jsonl");
        std::fs::write(
            &path,
            "# header\n\n{\"block\":\"event\",\"tow\":1,\"wnc\":2}\n{\"block\":\"bogus\"}\n",
        )
        .unwrap();

        let items: Vec<_> = open_records(&path).unwrap().collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        let err = items[1].as_ref().unwrap_err();
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn missing_file_fails_to_open() {
        let dir = tempdir().unwrap();
        assert!(open_records(&dir.path().join("absent.jsonl")).is_err());
    }
}
