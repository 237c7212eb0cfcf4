use crate::libs::max_chain::Interval;
use std::fmt;
use std::io::BufRead;

/// One motif hit read from a tab-separated hit file.
///
/// Columns: `label start end weight [name]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hit {
    pub label: String,
    pub start: i64,
    pub end: i64,
    pub weight: f64,
    pub name: Option<String>,
}

impl Hit {
    pub fn into_interval(self, default_name: String) -> Interval<String> {
        let name = self.name.unwrap_or(default_name);
        Interval::new(self.label, self.start, self.end, self.weight, name)
    }
}

impl std::str::FromStr for Hit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split('\t').collect();
        if fields.len() < 4 {
            return Err(anyhow::anyhow!("Invalid hit line: fewer than 4 columns"));
        }

        let parse_i64 = |s: &str| {
            s.trim()
                .parse::<i64>()
                .map_err(|_| anyhow::anyhow!("Invalid coordinate: {}", s))
        };

        let hit = Hit {
            label: fields[0].trim().to_string(),
            start: parse_i64(fields[1])?,
            end: parse_i64(fields[2])?,
            weight: fields[3]
                .trim()
                .parse::<f64>()
                .map_err(|_| anyhow::anyhow!("Invalid weight: {}", fields[3]))?,
            name: fields
                .get(4)
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        };

        if hit.label.is_empty() {
            return Err(anyhow::anyhow!("Invalid hit line: empty label"));
        }
        if hit.end < hit.start {
            return Err(anyhow::anyhow!(
                "Invalid hit line: end {} before start {}",
                hit.end,
                hit.start
            ));
        }
        Ok(hit)
    }
}

impl fmt::Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.label, self.start, self.end, self.weight
        )?;
        if let Some(name) = &self.name {
            write!(f, "\t{}", name)?;
        }
        Ok(())
    }
}

/// Reads hits from any buffered reader, skipping blank and `#` lines.
///
/// Hits without a name are called `<source>:<line>`.
pub fn parse_hits<R: BufRead>(reader: R, source: &str) -> anyhow::Result<Vec<Interval<String>>> {
    let mut intervals = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let hit: Hit = line
            .parse()
            .map_err(|e| anyhow::anyhow!("{}:{}: {}", source, i + 1, e))?;
        intervals.push(hit.into_interval(format!("{}:{}", source, i + 1)));
    }
    Ok(intervals)
}

/// Read hits from a file (or "stdin").
pub fn read_hits(infile: &str) -> anyhow::Result<Vec<Interval<String>>> {
    let reader = intspan::reader(infile);
    parse_hits(reader, infile)
}
