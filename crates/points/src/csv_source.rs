//! CSV point sources.

use crate::normalize::{normalize_fields, Normalized};
use crate::{ColumnMapping, PointsError, Result};
use encoding_rs::Encoding;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, instrument, warn};

const UTF8_BOM: char = '\u{feff}';

/// Reads a headered CSV and normalizes every row.
///
/// Cells are decoded with the mapping's encoding (UTF-8 unless set, EUC-KR
/// for the Seoul preset). Rows may have differing lengths. Byte sequences the
/// encoding cannot decode become U+FFFD rather than failing the whole
/// source. A header missing
/// the label, latitude or longitude column fails with
/// [`PointsError::MissingColumn`]; missing attribute columns only log a warning.
#[instrument(skip_all, fields(label = %mapping.label, encoding = %mapping.encoding))]
pub fn read_csv<R: Read>(reader: R, mapping: &ColumnMapping) -> Result<Normalized> {
    let encoding = mapping.decoder()?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| decode(encoding, h).trim().trim_start_matches(UTF8_BOM).to_string())
        .collect();
    debug!(columns = headers.len(), "Read CSV header");

    let index: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect();

    for column in mapping.required_columns() {
        if !index.contains_key(column) {
            return Err(PointsError::MissingColumn(column.to_string()));
        }
    }
    for column in &mapping.attributes {
        if !index.contains_key(column) {
            warn!(column = %column, "Attribute column not present in source");
        }
    }

    let mut outcome = Normalized::default();
    for (row_number, record) in reader.byte_records().enumerate() {
        let record = record?;
        let cells: Vec<String> = record.iter().map(|c| decode(encoding, c).into_owned()).collect();

        let result = normalize_fields(
            |column| {
                index
                    .get(column)
                    .and_then(|&i| cells.get(i))
                    .map(String::as_str)
            },
            mapping,
        );
        // header is line 1
        outcome.record(row_number + 2, result);
    }

    outcome.log_summary();
    Ok(outcome)
}

/// Opens a CSV file and reads it with [`read_csv`].
pub fn read_csv_file(path: impl AsRef<Path>, mapping: &ColumnMapping) -> Result<Normalized> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Opening point source");
    let file = File::open(path)?;
    read_csv(BufReader::new(file), mapping)
}

fn decode<'a>(encoding: &'static Encoding, bytes: &'a [u8]) -> Cow<'a, str> {
    encoding.decode_without_bom_handling(bytes).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SEOUL_SAMPLE: &str = "연번,도로명주소,y 좌표,x 좌표,개방시간,장애인화장실 현황
1,서울특별시 중구 세종대로 110,37.5663,126.9779,24시간,Y
2,서울특별시 종로구 세종대로 172,,126.9768,09:00~18:00,N
3,,37.5700,126.9800,24시간,Y
4,서울특별시 중구 을지로 30,37.5658,126.9810,,
";

    fn euc_kr(text: &str) -> Vec<u8> {
        let (bytes, _, unmappable) = encoding_rs::EUC_KR.encode(text);
        assert!(!unmappable);
        bytes.into_owned()
    }

    #[test]
    fn test_seoul_layout() {
        let data = euc_kr(SEOUL_SAMPLE);
        let outcome = read_csv(data.as_slice(), &ColumnMapping::seoul_open_restrooms()).unwrap();

        assert_eq!(outcome.rows_read, 4);
        assert_eq!(outcome.dropped, 2);
        assert_eq!(outcome.points.len(), 2);

        let city_hall = &outcome.points[0];
        assert_eq!(city_hall.label, "서울특별시 중구 세종대로 110");
        assert_eq!(city_hall.location.latitude, 37.5663);
        assert_eq!(city_hall.location.longitude, 126.9779);
        assert_eq!(city_hall.attribute("개방시간"), Some("24시간"));
        assert_eq!(city_hall.attribute("장애인화장실 현황"), Some("Y"));

        // empty attribute cells are omitted
        assert!(outcome.points[1].attributes.is_empty());
    }

    #[test]
    fn test_euc_kr_header_needs_matching_encoding() {
        let data = euc_kr("도로명주소,y 좌표,x 좌표\n서울특별시 중구 세종대로 110,37.5663,126.9779\n");

        let as_utf8 = ColumnMapping::seoul_open_restrooms().with_encoding("utf-8");
        let err = read_csv(data.as_slice(), &as_utf8).unwrap_err();
        assert!(matches!(err, PointsError::MissingColumn(ref c) if c == "도로명주소"));

        let outcome = read_csv(data.as_slice(), &ColumnMapping::seoul_open_restrooms()).unwrap();
        assert_eq!(outcome.points.len(), 1);
        assert_eq!(outcome.points[0].label, "서울특별시 중구 세종대로 110");
    }

    #[test]
    fn test_utf8_export_with_bom() {
        let data = format!("\u{feff}{}", SEOUL_SAMPLE);
        let mapping = ColumnMapping::seoul_open_restrooms().with_encoding("utf-8");

        let outcome = read_csv(data.as_bytes(), &mapping).unwrap();
        assert_eq!(outcome.points.len(), 2);
        assert_eq!(outcome.points[0].label, "서울특별시 중구 세종대로 110");
    }

    #[test]
    fn test_unknown_encoding() {
        let mapping = ColumnMapping::default().with_encoding("morse");
        let err = read_csv("label,lat,lon\n".as_bytes(), &mapping).unwrap_err();
        assert!(matches!(err, PointsError::UnknownEncoding(_)));
    }

    #[test]
    fn test_missing_required_column() {
        let data = "name,lat,lon\nGate,37.5,127.0\n";
        let err = read_csv(data.as_bytes(), &ColumnMapping::default()).unwrap_err();
        assert!(matches!(err, PointsError::MissingColumn(ref c) if c == "label"));
    }

    #[test]
    fn test_short_rows_and_invalid_utf8() {
        let mut data = b"label,lat,lon,hours\nshort,37.5\n".to_vec();
        data.extend_from_slice(b"caf\xe9,37.5,127.0,24h\n");
        let mapping = ColumnMapping::default().with_attributes(["hours"]);

        let outcome = read_csv(data.as_slice(), &mapping).unwrap();
        assert_eq!(outcome.dropped, 1);
        assert_eq!(outcome.points.len(), 1);
        assert!(outcome.points[0].label.starts_with("caf"));
    }

    #[test]
    fn test_read_csv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "label,lat,lon").unwrap();
        writeln!(file, "Finish line,37.5110,127.0730").unwrap();

        let outcome = read_csv_file(file.path(), &ColumnMapping::default()).unwrap();
        assert_eq!(outcome.points.len(), 1);
        assert_eq!(outcome.points[0].label, "Finish line");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_csv_file("/no/such/points.csv", &ColumnMapping::default()).unwrap_err();
        assert!(matches!(err, PointsError::Io(_)));
    }
}
