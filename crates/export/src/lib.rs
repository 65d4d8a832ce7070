//! Export helpers for eccentricity reports (CSV and JSON).

pub mod report {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    const HEADER: [&str; 14] = [
        "name",
        "units",
        "mu",
        "rx",
        "ry",
        "rz",
        "vx",
        "vy",
        "vz",
        "ex",
        "ey",
        "ez",
        "eccentricity",
        "shape",
    ];

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// One evaluated state vector.
    #[derive(Debug, Clone, Serialize)]
    pub struct Row<'a> {
        pub name: &'a str,
        pub units: &'a str,
        pub mu: f64,
        pub position: [f64; 3],
        pub velocity: [f64; 3],
        pub eccentricity_vector: [f64; 3],
        pub eccentricity: f64,
        pub shape: &'a str,
    }

    impl<'a> Row<'a> {
        /// CSV fields in header order. Floats use the shortest round-trip
        /// representation; `mu` is written in exponent form.
        pub fn record(&self) -> [String; 14] {
            [
                self.name.to_string(),
                self.units.to_string(),
                format!("{:e}", self.mu),
                self.position[0].to_string(),
                self.position[1].to_string(),
                self.position[2].to_string(),
                self.velocity[0].to_string(),
                self.velocity[1].to_string(),
                self.velocity[2].to_string(),
                self.eccentricity_vector[0].to_string(),
                self.eccentricity_vector[1].to_string(),
                self.eccentricity_vector[2].to_string(),
                self.eccentricity.to_string(),
                self.shape.to_string(),
            ]
        }
    }

    /// Header plus every row. Fields containing separators or quotes are quoted.
    pub fn write_csv(writer: &mut dyn Write, rows: &[Row<'_>]) -> io::Result<()> {
        let mut out = csv::Writer::from_writer(&mut *writer);
        out.write_record(HEADER)?;
        for row in rows {
            out.write_record(row.record())?;
        }
        out.flush()
    }

    #[derive(Serialize)]
    struct Envelope<'a> {
        generated_by: &'static str,
        cases: &'a [Row<'a>],
    }

    /// Pretty JSON document `{ "generated_by": ..., "cases": [...] }`.
    pub fn write_json(writer: &mut dyn Write, rows: &[Row<'_>]) -> io::Result<()> {
        let envelope = Envelope {
            generated_by: concat!("shape_export ", env!("CARGO_PKG_VERSION")),
            cases: rows,
        };
        to_writer_pretty(&mut *writer, &envelope).map_err(io::Error::other)?;
        writeln!(writer)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::report::*;

    fn sample() -> Row<'static> {
        Row {
            name: "leo",
            units: "km",
            mu: 3.986004418e5,
            position: [1000.0, 5000.0, 7000.0],
            velocity: [3.0, 4.0, 5.0],
            eccentricity_vector: [-0.25, -0.5, -0.75],
            eccentricity: 0.9475409561789646,
            shape: "elliptical",
        }
    }

    #[test]
    fn csv_row_matches_header_width() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[sample()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        let row = lines.next().unwrap();
        assert_eq!(header.split(',').count(), row.split(',').count());
        assert!(row.starts_with("leo,km,3.986004418e5,1000,5000,7000,3,4,5,"));
        assert!(row.ends_with(",0.9475409561789646,elliptical"));
    }

    #[test]
    fn names_with_separators_are_quoted() {
        let row = Row {
            name: "LEO, \"inclined\"",
            ..sample()
        };
        let mut buf = Vec::new();
        write_csv(&mut buf, &[row]).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.contains("\"LEO, \"\"inclined\"\"\",km,"));

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        assert_eq!(reader.headers().unwrap().len(), 14);
        let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 14);
        assert_eq!(&records[0][0], "LEO, \"inclined\"");
        assert_eq!(&records[0][13], "elliptical");
    }

    #[test]
    fn json_envelope_lists_cases() {
        let mut buf = Vec::new();
        write_json(&mut buf, &[sample(), sample()]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let cases = value["cases"].as_array().unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0]["shape"], "elliptical");
        let e = cases[0]["eccentricity"].as_f64().unwrap();
        assert!((e - 0.9475409561789646).abs() < 1e-15);
    }

    #[test]
    fn writer_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.csv");
        {
            let mut writer = writer_for_path(&path).unwrap();
            write_csv(writer.as_mut(), &[sample()]).unwrap();
        }
        assert!(path.exists());
    }
}
