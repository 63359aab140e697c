use crate::error::Result;
use crate::models::DeltaPoint;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save deltas as CSV with a `date,value` header (ISO dates).
pub fn save_csv<P: AsRef<Path>>(points: &[DeltaPoint], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["date", "value"])?;
    for p in points {
        wtr.serialize((p.date.to_string(), p.value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save deltas as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(points: &[DeltaPoint], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(points)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
