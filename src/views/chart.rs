use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Chart specification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Treemap,
    Scatter,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Declarative display instructions for one derived view.
///
/// Bindings name columns of the view. For pie charts `x` holds the slice
/// names and `y` the slice values; treemaps use `path` plus `y`.
/// No concrete colors: `color` only says which column drives them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub orientation: Orientation,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    pub categorical_x: bool,
    pub show_legend: bool,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            x: None,
            y: None,
            color: None,
            orientation: Orientation::Vertical,
            path: Vec::new(),
            labels: BTreeMap::new(),
            categorical_x: false,
            show_legend: true,
        }
    }

    pub fn x(mut self, column: &str) -> Self {
        self.x = Some(column.to_string());
        self
    }

    pub fn y(mut self, column: &str) -> Self {
        self.y = Some(column.to_string());
        self
    }

    pub fn color(mut self, column: &str) -> Self {
        self.color = Some(column.to_string());
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Horizontal;
        self
    }

    pub fn path(mut self, columns: &[&str]) -> Self {
        self.path = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Axis or legend caption for a column.
    pub fn label(mut self, column: &str, text: &str) -> Self {
        self.labels.insert(column.to_string(), text.to_string());
        self
    }

    pub fn categorical_x(mut self) -> Self {
        self.categorical_x = true;
        self
    }

    pub fn hide_legend(mut self) -> Self {
        self.show_legend = false;
        self
    }
}

// ---------------------------------------------------------------------------
// Table styling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    /// `1,234,567`
    ThousandsInteger,
    /// `12.34%`
    Percent2,
}

/// Formatting and highlighting for a table panel, kept apart from the
/// query that produced the rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TableStyle {
    pub formats: BTreeMap<String, NumberFormat>,
    /// Columns whose largest cell is emphasised.
    pub highlight_max: Vec<String>,
    /// Columns whose smallest cell is emphasised.
    pub highlight_min: Vec<String>,
    /// Columns drawn with an in-cell bar.
    pub bars: Vec<String>,
}

impl TableStyle {
    pub fn format(mut self, column: &str, format: NumberFormat) -> Self {
        self.formats.insert(column.to_string(), format);
        self
    }

    pub fn highlight_max(mut self, column: &str) -> Self {
        self.highlight_max.push(column.to_string());
        self
    }

    pub fn highlight_min(mut self, column: &str) -> Self {
        self.highlight_min.push(column.to_string());
        self
    }

    pub fn bar(mut self, column: &str) -> Self {
        self.bars.push(column.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_style_names_formats_per_column() {
        let style = TableStyle::default()
            .format("Laid_Off_Count", NumberFormat::ThousandsInteger)
            .format("Percentage", NumberFormat::Percent2)
            .highlight_max("Laid_Off_Count");
        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(json["formats"]["Laid_Off_Count"], "thousands_integer");
        assert_eq!(json["formats"]["Percentage"], "percent2");
        assert_eq!(json["highlight_max"][0], "Laid_Off_Count");
        assert!(json["bars"].as_array().unwrap().is_empty());
    }

    #[test]
    fn chart_spec_skips_unset_bindings() {
        let spec = ChartSpec::new(ChartKind::Line, "Yearly")
            .x("Year")
            .y("Laid_Off_Count")
            .categorical_x();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "line");
        assert_eq!(json["orientation"], "vertical");
        assert_eq!(json["categorical_x"], true);
        assert!(json.get("color").is_none());
        assert!(json.get("path").is_none());
    }
}
