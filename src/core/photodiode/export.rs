//! Durable export of detected events.

use super::error::PhotodiodeError;
use super::extractor::DetectedEvent;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the full event table as CSV, one row per event.
pub fn write_events_csv(path: &Path, events: &[DetectedEvent]) -> Result<(), PhotodiodeError> {
    let mut writer = csv::Writer::from_path(path)?;
    write_events_to(&mut writer, events)?;
    info!("✓ wrote {} events to {:?}", events.len(), path);
    Ok(())
}

/// Write bare timestamps, one fixed-width seconds value per line.
pub fn write_timestamps_txt(path: &Path, events: &[DetectedEvent]) -> Result<(), PhotodiodeError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_timestamps_to(&mut out, events)?;
    out.flush()?;
    info!("✓ wrote {} timestamps to {:?}", events.len(), path);
    Ok(())
}

fn write_events_to<W: Write>(
    writer: &mut csv::Writer<W>,
    events: &[DetectedEvent],
) -> Result<(), PhotodiodeError> {
    for event in events {
        writer.serialize(event)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_timestamps_to<W: Write>(
    out: &mut W,
    events: &[DetectedEvent],
) -> Result<(), PhotodiodeError> {
    for event in events {
        writeln!(out, "{:10.6}", event.timestamp)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> Vec<DetectedEvent> {
        vec![
            DetectedEvent {
                global_index: 6,
                timestamp: 0.6,
                value: 7.5,
                source_chunk: "150702a".to_string(),
            },
            DetectedEvent {
                global_index: 12,
                timestamp: 1.2,
                value: 9.0,
                source_chunk: "150702b".to_string(),
            },
        ]
    }

    #[test]
    fn test_csv_shape() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_events_to(&mut writer, &events()).unwrap();

        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("global_index,timestamp,value,source_chunk")
        );
        assert_eq!(lines.next(), Some("6,0.6,7.5,150702a"));
        assert_eq!(lines.next(), Some("12,1.2,9.0,150702b"));
    }

    #[test]
    fn test_timestamp_lines_are_fixed_width() {
        let mut out = Vec::new();
        write_timestamps_to(&mut out, &events()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "  0.600000\n  1.200000\n");
    }
}
