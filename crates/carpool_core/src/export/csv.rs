use std::io::{Read, Write};

use super::{AssignmentRow, ExportError};

/// Column names, in order.
pub const HEADER: [&str; 3] = ["Driver", "Passenger", "Passenger Address"];

/// Write the header and every row as UTF-8 CSV. The header is written even
/// when there are no rows.
pub fn write_csv<W: Write>(rows: &[AssignmentRow], writer: W) -> Result<(), ExportError> {
    let mut wtr = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record([&row.driver, &row.passenger, &row.passenger_address])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Read a table previously written by [`write_csv`].
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<AssignmentRow>, ExportError> {
    let mut rdr = ::csv::Reader::from_reader(reader);
    let rows = rdr
        .deserialize::<AssignmentRow>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(driver: &str, passenger: &str, address: &str) -> AssignmentRow {
        AssignmentRow {
            driver: driver.into(),
            passenger: passenger.into(),
            passenger_address: address.into(),
        }
    }

    #[test]
    fn header_matches_table_layout() {
        let mut out = Vec::new();
        write_csv(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Driver,Passenger,Passenger Address\n");
    }

    #[test]
    fn addresses_with_commas_are_quoted() {
        let mut out = Vec::new();
        write_csv(
            &[row("Joel", "Zaida", "4039 Locust Street, Philadelphia, PA 19104")],
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("Joel,Zaida,\"4039 Locust Street, Philadelphia, PA 19104\"\n"));
    }

    #[test]
    fn non_ascii_names_survive() {
        let rows = vec![row("Sa’ryah", "Liz’s Friend", "1500 Hamilton St")];
        let mut out = Vec::new();
        write_csv(&rows, &mut out).unwrap();
        assert_eq!(read_csv(out.as_slice()).unwrap(), rows);
    }
}
