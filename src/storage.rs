use crate::error::Result;
use crate::models::SeriesPoint;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save series rows as CSV with header.
pub fn save_csv<P: AsRef<Path>>(points: &[SeriesPoint], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("country", "year", "indicator", "value", "unit"))?;
    for p in points {
        wtr.serialize((&p.country, &p.year, &p.indicator, p.value, &p.unit))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save series rows as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(points: &[SeriesPoint], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(points)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
