//! Aligned plain-text tables for `--format table`.

const MIN_WIDTH: usize = 4;
const GAP: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    Done,
    Waiting,
    Stopped,
}

impl Tone {
    const fn ansi(self) -> &'static str {
        match self {
            Self::Done => "32",
            Self::Waiting => "33",
            Self::Stopped => "31",
        }
    }
}

/// Tone of a status or flag cell. Only `status`, `allowed`, `active` and
/// `current` columns are toned, so a title containing "APPROVED" stays plain.
fn tone(header: &str, value: &str) -> Option<Tone> {
    let column = header.rsplit('.').next().unwrap_or(header);
    match column {
        "status" => match value {
            "APPROVED" => Some(Tone::Done),
            "PENDING" | "SAVED_FOR_LATER" | "REQUEST_MODIFICATION" => Some(Tone::Waiting),
            "REJECTED" => Some(Tone::Stopped),
            _ => None,
        },
        "allowed" | "active" | "current" => match value {
            "true" => Some(Tone::Done),
            "false" => Some(Tone::Stopped),
            _ => None,
        },
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    /// Rows are `field, value` pairs; values are toned by their field name.
    keyed: bool,
}

impl Table {
    #[must_use]
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            keyed: false,
        }
    }

    /// Two-column `field | value` table for a single record.
    #[must_use]
    pub fn record(fields: Vec<(String, String)>) -> Self {
        Self {
            headers: vec!["field".into(), "value".into()],
            rows: fields.into_iter().map(|(k, v)| vec![k, v]).collect(),
            keyed: true,
        }
    }

    /// Missing trailing cells render as `-`.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn render(&self, options: TableOptions) -> String {
        let mut widths = self.natural_widths();
        if let Some(max) = options.max_width {
            shrink_to_fit(&mut widths, &self.headers, max);
        }

        let header_line = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(header, width)| pad(&clip(header, *width), *width, false))
            .collect::<Vec<_>>()
            .join(GAP);
        let divider = "-".repeat(header_line.chars().count());

        let mut lines = vec![header_line.trim_end().to_string(), divider];
        for row in &self.rows {
            let line = self
                .headers
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(index, (header, width))| {
                    let value = row.get(index).map_or("-", String::as_str);
                    let text = pad(&clip(value, *width), *width, is_numeric(value));
                    let column = match row.first() {
                        Some(field) if self.keyed && index == 1 => field.as_str(),
                        _ => header.as_str(),
                    };
                    match tone(column, value) {
                        Some(tone) if options.color => {
                            format!("\u{1b}[{}m{text}\u{1b}[0m", tone.ansi())
                        }
                        _ => text,
                    }
                })
                .collect::<Vec<_>>()
                .join(GAP);
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    fn natural_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.chars().count())
                    .chain([header.chars().count(), MIN_WIDTH])
                    .max()
                    .unwrap_or(MIN_WIDTH)
            })
            .collect()
    }
}

/// Narrow the widest shrinkable column one step at a time until the row fits.
/// A column never gets narrower than its header.
fn shrink_to_fit(widths: &mut [usize], headers: &[String], max: usize) {
    let gaps = widths.len().saturating_sub(1) * GAP.len();
    while widths.iter().sum::<usize>() + gaps > max {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].chars().count().max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            return;
        };
        widths[index] -= 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut clipped: String = value.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.parse::<f64>().is_ok()
}
