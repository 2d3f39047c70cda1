//! CSV export of the projection series

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::projection::ProjectionPoint;

/// Write points to CSV with a header row
pub fn write_csv<'a, W, I>(writer: W, points: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ProjectionPoint>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in points {
        csv_writer.serialize(point)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write points to a CSV file, creating or truncating it
pub fn write_csv_file<'a, P, I>(path: P, points: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a ProjectionPoint>,
{
    let file = File::create(path.as_ref())?;
    write_csv(file, points)?;
    log::info!("Wrote projection series to {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;
    use crate::scenario::ScenarioInput;

    #[test]
    fn test_write_csv_header_and_rows() {
        let result = project(&ScenarioInput::new(1_000.0, 0.05, 30, 32)).unwrap();

        let mut buffer = Vec::new();
        write_csv(&mut buffer, &result.points).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "month,year,month_in_year,attained_age,nominal_value,real_value,inflation_factor,\
             growth,contribution,lump_sum,contributed,lump_sums"
        );
        assert!(lines.next().unwrap().starts_with("0,0,0,30,1000.0,1000.0,1.0,"));
        assert_eq!(text.lines().count(), 1 + 25);
    }

    #[test]
    fn test_write_yearly_csv() {
        let result = project(&ScenarioInput::new(1_000.0, 0.05, 30, 35)).unwrap();

        let mut buffer = Vec::new();
        write_csv(&mut buffer, result.yearly()).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 1 + 6);
    }
}
